// src/output/mod.rs

pub mod json;
pub mod tsv;

pub use json::to_json;
pub use tsv::to_tsv;

use anyhow::{Context, Result};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::catalog::StarRecord;

/// Where the three derived files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub normalized: PathBuf,
    pub json: PathBuf,
    pub tsv: PathBuf,
}

/// Write `contents` to a temp file beside `path`, then rename it over
/// `path`. Readers never see a half-written file. Missing parent
/// directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let mut tmp =
        NamedTempFile::new_in(dir).with_context(|| format!("creating temp file in {:?}", dir))?;
    tmp.write_all(contents)
        .with_context(|| format!("writing temp file for {:?}", path))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("renaming temp file -> {:?}", path))?;
    Ok(())
}

/// Render every output in memory first, then write them.
#[instrument(level = "info", skip_all, fields(records = records.len()))]
pub fn write_all(paths: &OutputPaths, normalized: &str, records: &[StarRecord]) -> Result<()> {
    let json = to_json(records)?;
    let tsv = to_tsv(records)?;

    info!("Recording normalized catalog → {}", paths.normalized.display());
    write_atomic(&paths.normalized, normalized.as_bytes())?;

    info!("Recording TSV catalog → {}", paths.tsv.display());
    write_atomic(&paths.tsv, tsv.as_bytes())?;

    info!("Recording JSON catalog → {}", paths.json.display());
    write_atomic(&paths.json, json.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures::SAMPLE, parse_catalog, Column};
    use crate::normalize::normalize_text;
    use anyhow::Result;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_all_creates_three_files() -> Result<()> {
        let dir = tempdir()?;
        let paths = OutputPaths {
            normalized: dir.path().join("IAU-CSN_normalized.txt"),
            json: dir.path().join("IAU-CSN.json"),
            tsv: dir.path().join("IAU-CSN.tsv"),
        };
        let catalog = parse_catalog(SAMPLE)?;
        write_all(&paths, &normalize_text(SAMPLE), &catalog.records)?;

        let json = fs::read_to_string(&paths.json)?;
        assert!(json.contains("\"Añañuca\""));
        assert_eq!(fs::read_to_string(&paths.normalized)?, normalize_text(SAMPLE));
        assert_eq!(fs::read_to_string(&paths.tsv)?.lines().count(), catalog.records.len() + 1);

        // nothing but the three outputs is left behind
        assert_eq!(fs::read_dir(dir.path())?.count(), 3);
        Ok(())
    }

    #[test]
    fn test_write_atomic_replaces_existing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.txt");
        fs::write(&path, "old")?;
        write_atomic(&path, b"new")?;
        assert_eq!(fs::read_to_string(&path)?, "new");
        Ok(())
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog_data").join("out.txt");
        write_atomic(&path, b"fresh")?;
        assert_eq!(fs::read_to_string(&path)?, "fresh");
        Ok(())
    }

    #[test]
    fn test_json_and_tsv_rows_correspond() -> Result<()> {
        let catalog = parse_catalog(SAMPLE)?;
        let json: Vec<Value> = serde_json::from_str(&to_json(&catalog.records)?)?;
        let tsv = to_tsv(&catalog.records)?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(tsv.as_bytes());
        let headers = rdr.headers()?.clone();
        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>()?;
        assert_eq!(rows.len(), json.len());

        for (object, row) in json.iter().zip(&rows) {
            for (header, cell) in headers.iter().zip(row.iter()) {
                match &object[header] {
                    Value::Null => assert_eq!(cell, "-", "{}", header),
                    Value::String(s) => assert_eq!(cell, s, "{}", header),
                    other => panic!("unexpected JSON value {:?}", other),
                }
            }
        }
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            Column::ALL.iter().map(|c| c.header()).collect::<Vec<_>>()
        );
        Ok(())
    }
}
