// src/error.rs

use thiserror::Error;

/// The catalog layout changed in a way the parser cannot absorb.
/// Fatal: nothing is written when one of these comes back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no header row found; expected a line naming `{expected}`")]
    HeaderNotFound { expected: String },

    #[error("header row at line {line} has no `{column}` column; the catalog format changed")]
    MissingColumn { line: usize, column: &'static str },
}

/// Why a data row was skipped.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RowProblem {
    #[error("missing required field Name/ASCII")]
    MissingName,
    #[error("Name/ASCII is not a star name")]
    InvalidName,
}

/// A single data row that could not become a record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {problem}: `{content}`")]
pub struct RowError {
    /// 1-based line number in the source file.
    pub line: usize,
    pub problem: RowProblem,
    pub content: String,
}
