// src/catalog/row.rs
//! Turning one data line into column values.
//!
//! Two strategies run as a pipeline: slice by the header's fixed offsets,
//! and if that result fails validation, re-split the line on whitespace
//! and assign tokens to columns by backtracking. The first result that
//! validates is kept.

use super::columns::{is_placeholder, Column};
use super::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    FixedWidth,
    Tokens,
}

/// Trimmed raw values, one per layout column, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowValues(pub Vec<(Column, String)>);

impl RowValues {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Columns whose value its validator rejects.
    pub fn invalid_columns(&self) -> Vec<Column> {
        self.0
            .iter()
            .filter(|(c, v)| !c.accepts(v))
            .map(|(c, _)| *c)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub values: RowValues,
    pub strategy: Strategy,
    /// Columns kept despite failing validation (neither strategy fit).
    pub invalid: Vec<Column>,
}

struct FixedCut {
    values: RowValues,
    cuts_token: bool,
}

impl FixedCut {
    fn plausible(&self) -> bool {
        !self.cuts_token && self.values.invalid_columns().is_empty()
    }
}

fn fixed_width(line: &str, layout: &Layout) -> FixedCut {
    let chars: Vec<char> = line.chars().collect();
    let mut cuts_token = false;
    let values = layout
        .boundaries
        .iter()
        .map(|b| {
            if b.start > 0 && b.start < chars.len() {
                cuts_token |= !chars[b.start - 1].is_whitespace() && !chars[b.start].is_whitespace();
            }
            let end = b.end.unwrap_or(chars.len()).min(chars.len());
            let value = if b.start < end {
                chars[b.start..end].iter().collect::<String>().trim().to_string()
            } else {
                String::new()
            };
            (b.column, value)
        })
        .collect();
    FixedCut {
        values: RowValues(values),
        cuts_token,
    }
}

/// The diacritic name spans as many words as the ASCII one.
fn names_agree(column: Column, value: &str, taken: usize, out: &[(Column, String)]) -> bool {
    if column != Column::NameDiacritics || is_placeholder(value) {
        return true;
    }
    match out.iter().find(|(c, _)| *c == Column::NameAscii) {
        Some((_, ascii)) => ascii.split_whitespace().count() == taken,
        None => true,
    }
}

fn assign(columns: &[Column], tokens: &[&str], out: &mut Vec<(Column, String)>) -> bool {
    let Some((&column, rest)) = columns.split_first() else {
        return tokens.is_empty();
    };

    // trailing columns may be blank once the line runs out
    if tokens.is_empty() {
        if columns.iter().all(|c| c.accepts("")) {
            out.extend(columns.iter().map(|&c| (c, String::new())));
            return true;
        }
        return false;
    }

    for taken in (1..=column.max_tokens().min(tokens.len())).rev() {
        let value = tokens[..taken].join(" ");
        if !column.accepts(&value) || !names_agree(column, &value, taken, out) {
            continue;
        }
        out.push((column, value));
        if assign(rest, &tokens[taken..], out) {
            return true;
        }
        out.pop();
    }
    false
}

/// Re-split `line` on whitespace, giving each column in header order a
/// run of tokens its validator accepts. `None` when no assignment fits.
pub fn token_split(line: &str, layout: &Layout) -> Option<RowValues> {
    let columns: Vec<Column> = layout.columns().collect();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut out = Vec::with_capacity(columns.len());
    assign(&columns, &tokens, &mut out).then_some(RowValues(out))
}

/// Extract the values of one data line.
pub fn parse_row(line: &str, layout: &Layout) -> ParsedRow {
    let fixed = fixed_width(line, layout);
    if fixed.plausible() {
        return ParsedRow {
            values: fixed.values,
            strategy: Strategy::FixedWidth,
            invalid: Vec::new(),
        };
    }

    if let Some(values) = token_split(line, layout) {
        return ParsedRow {
            values,
            strategy: Strategy::Tokens,
            invalid: Vec::new(),
        };
    }

    let invalid = fixed.values.invalid_columns();
    ParsedRow {
        values: fixed.values,
        strategy: Strategy::FixedWidth,
        invalid,
    }
}
