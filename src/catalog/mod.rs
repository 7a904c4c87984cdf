// src/catalog/mod.rs
//! Parsing the fixed-width star-name table.

pub mod columns;
pub mod layout;
pub mod record;
pub mod row;

#[cfg(test)]
pub(crate) mod fixtures;

pub use columns::Column;
pub use layout::{Boundary, Layout};
pub use record::{CrossId, Field, StarRecord};
pub use row::{parse_row, token_split, ParsedRow, RowValues, Strategy};

use tracing::{info, instrument, warn};

use crate::error::{CatalogError, RowError, RowProblem};
use crate::normalize::{clean_line, is_comment, split_lines, unescape_unicode};

/// Everything one parse run produced.
#[derive(Debug)]
pub struct Catalog {
    pub layout: Layout,
    /// In catalog order. Duplicate names are kept.
    pub records: Vec<StarRecord>,
    pub rejected: Vec<RowError>,
    /// Non-blank, non-comment lines after the header.
    pub data_lines: usize,
    /// Rows recovered by the whitespace re-split.
    pub fallback_rows: usize,
}

/// Parse decoded catalog text into records.
///
/// Fails only when the header row is missing or lacks a required column;
/// bad rows are logged and collected in [`Catalog::rejected`]. A row is bad
/// when its `Name/ASCII` is empty or still fails validation after both
/// extraction strategies.
#[instrument(level = "info", skip(text), fields(content_len = text.len()))]
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let lines: Vec<String> = split_lines(text)
        .into_iter()
        .map(|l| unescape_unicode(&clean_line(l)).into_owned())
        .collect();

    let layout = Layout::detect(&lines)?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut data_lines = 0usize;
    let mut fallback_rows = 0usize;

    for (idx, line) in lines.iter().enumerate().skip(layout.header_index + 1) {
        if line.is_empty() || is_comment(line) {
            continue;
        }
        data_lines += 1;
        let line_no = idx + 1;

        let row = parse_row(line, &layout);
        let name = row.values.get(Column::NameAscii).unwrap_or_default();

        if row.strategy == Strategy::Tokens {
            fallback_rows += 1;
            warn!(
                line = line_no,
                star = name,
                "row does not fit the header's column boundaries; re-split on whitespace"
            );
        }

        let built = StarRecord::from_values(&row.values, line_no, line).and_then(|record| {
            // other columns may stay suspect, a bad name may not
            if row.invalid.contains(&Column::NameAscii) {
                Err(RowError {
                    line: line_no,
                    problem: RowProblem::InvalidName,
                    content: line.trim_end().to_string(),
                })
            } else {
                Ok(record)
            }
        });

        match built {
            Ok(record) => {
                for &column in &row.invalid {
                    warn!(
                        line = line_no,
                        star = name,
                        column = column.header(),
                        value = row.values.get(column).unwrap_or_default(),
                        "failed validation; continuing with the unchanged value"
                    );
                }
                records.push(record);
            }
            Err(e) => {
                warn!(error = %e, "rejecting row");
                rejected.push(e);
            }
        }
    }

    info!(
        records = records.len(),
        rejected = rejected.len(),
        fallback_rows,
        "parsed catalog"
    );

    Ok(Catalog {
        layout,
        records,
        rejected,
        data_lines,
        fallback_rows,
    })
}
