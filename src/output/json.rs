// src/output/json.rs

use anyhow::{Context, Result};

use crate::catalog::StarRecord;

/// Pretty-printed JSON array in catalog order, with a trailing newline.
/// Absent fields are `null`; non-ASCII names stay literal.
pub fn to_json(records: &[StarRecord]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(records).context("serializing records to JSON")?;
    out.push('\n');
    Ok(out)
}
