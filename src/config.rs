// src/config.rs

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

use crate::output::OutputPaths;

pub const DEFAULT_SOURCE_URL: &str = "http://www.pas.rochester.edu/~emamajek/WGSN/IAU-CSN.txt";
pub const DEFAULT_DATA_DIR: &str = "catalog_data";

const FALLBACK_FILE_NAME: &str = "IAU-CSN.txt";

/// Runtime settings. Defaults can be overridden with `CSN_SOURCE_URL` and
/// `CSN_DATA_DIR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_url: Url,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("CSN_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let source_url =
            Url::parse(&raw_url).with_context(|| format!("parsing CSN_SOURCE_URL {:?}", raw_url))?;
        let data_dir = lookup("CSN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Ok(Self {
            source_url,
            data_dir,
        })
    }

    /// Last segment of the source URL.
    pub fn source_file_name(&self) -> &str {
        self.source_url
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
    }

    pub fn source_path(&self) -> PathBuf {
        self.data_dir.join(self.source_file_name())
    }

    /// Derived files are named after the source's stem.
    pub fn output_paths(&self) -> OutputPaths {
        let stem = Path::new(self.source_file_name())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("IAU-CSN");
        OutputPaths {
            normalized: self.data_dir.join(format!("{}_normalized.txt", stem)),
            json: self.data_dir.join(format!("{}.json", stem)),
            tsv: self.data_dir.join(format!("{}.tsv", stem)),
        }
    }
}
