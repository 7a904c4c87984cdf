// src/catalog/layout.rs

use tracing::{debug, trace};

use super::columns::Column;
use crate::error::CatalogError;

/// Character range of one column within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub column: Column,
    pub start: usize,
    /// Exclusive; `None` for the last column, which runs to end of line.
    pub end: Option<usize>,
}

/// Column boundaries for one catalog file, derived from its header row.
/// Built once and shared read-only by every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// 0-based index of the header row among the file's lines.
    pub header_index: usize,
    /// Sorted by `start`, i.e. in header order.
    pub boundaries: Vec<Boundary>,
}

/// Whitespace-delimited tokens of a header line with their char offsets.
/// A leading comment marker counts as whitespace.
fn header_tokens(line: &str) -> Vec<(usize, String)> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, String)> = None;
    for (pos, c) in line.chars().enumerate() {
        let blank = c.is_whitespace() || (pos == 0 && (c == '#' || c == '$'));
        if blank {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
        } else {
            current.get_or_insert_with(|| (pos, String::new())).1.push(c);
        }
    }
    tokens.extend(current);
    tokens
}

/// True for the row that names the table's columns.
pub fn is_header(line: &str) -> bool {
    let tokens = header_tokens(line);
    let has = |column: Column| {
        tokens
            .iter()
            .any(|(_, t)| column.aliases().contains(&t.as_str()))
    };
    has(Column::NameAscii) && has(Column::Designation) && has(Column::Hip)
}

impl Layout {
    /// Find the header row among `lines` and derive the boundaries from it.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Result<Self, CatalogError> {
        let header_index = lines
            .iter()
            .position(|l| is_header(l.as_ref()))
            .ok_or_else(|| CatalogError::HeaderNotFound {
                expected: "Name/ASCII, Designation, HIP".to_string(),
            })?;
        debug!(line = header_index + 1, "found header row");
        Self::from_header(lines[header_index].as_ref(), header_index)
    }

    /// Derive boundaries from a header line. Each column takes the first
    /// header token matching one of its aliases that no earlier column has
    /// claimed.
    pub fn from_header(header: &str, header_index: usize) -> Result<Self, CatalogError> {
        let tokens = header_tokens(header);
        let mut claimed = vec![false; tokens.len()];
        let mut found: Vec<(Column, usize)> = Vec::with_capacity(Column::ALL.len());

        for column in Column::ALL {
            let hit = tokens
                .iter()
                .enumerate()
                .find(|(i, (_, tok))| !claimed[*i] && column.aliases().contains(&tok.as_str()))
                .map(|(i, (start, _))| (i, *start));
            match hit {
                Some((i, start)) => {
                    claimed[i] = true;
                    trace!(column = column.header(), start, "located column");
                    found.push((column, start));
                }
                None if column.required_in_header() => {
                    return Err(CatalogError::MissingColumn {
                        line: header_index + 1,
                        column: column.header(),
                    });
                }
                None => debug!(column = column.header(), "optional column absent from header"),
            }
        }

        found.sort_by_key(|&(_, start)| start);
        // rows start at offset 0 even when the header is a `#` comment
        if let Some(first) = found.first_mut() {
            first.1 = 0;
        }

        let boundaries = found
            .iter()
            .enumerate()
            .map(|(i, &(column, start))| Boundary {
                column,
                start,
                end: found.get(i + 1).map(|&(_, next)| next),
            })
            .collect();

        Ok(Layout {
            header_index,
            boundaries,
        })
    }

    /// Columns in header order.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.boundaries.iter().map(|b| b.column)
    }

    pub fn boundary(&self, column: Column) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.column == column)
    }
}
