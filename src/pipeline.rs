// src/pipeline.rs
//! One end-to-end run: fetch, normalize, parse, write, summarize.

use anyhow::{Context, Result};
use reqwest::Client;
use std::fs;
use tracing::{debug, info, instrument, warn};

use crate::catalog;
use crate::config::Config;
use crate::error::RowError;
use crate::fetch::{self, FetchOutcome};
use crate::normalize;
use crate::output;

/// How many skipped rows / changed lines to echo in the summary.
pub const SAMPLE_LIMIT: usize = 5;

/// What a successful run did.
#[derive(Debug)]
pub struct RunSummary {
    pub fetch: FetchOutcome,
    pub records: usize,
    pub rejected: Vec<RowError>,
    pub fallback_rows: usize,
    pub changed_lines: usize,
}

/// Fetch the catalog if it is not on disk yet, then write the normalized
/// text, JSON and TSV next to it.
///
/// A transport or structural error returns before any output is written.
/// Skipped rows do not fail the run; they are logged and returned.
#[instrument(level = "info", skip_all, fields(data_dir = %config.data_dir.display()))]
pub async fn run(config: &Config, client: &Client) -> Result<RunSummary> {
    let source_path = config.source_path();

    // ─── 1) fetch the catalog unless we already have it ──────────────
    let outcome = fetch::ensure_source(client, &config.source_url, &source_path)
        .await
        .context("fetching the catalog failed; no output files were written")?;

    // ─── 2) decode + normalize ───────────────────────────────────────
    let bytes =
        fs::read(&source_path).with_context(|| format!("reading {}", source_path.display()))?;
    let text = normalize::decode_bytes(&bytes);
    let normalized = normalize::normalize_text(&text);

    let changes = normalize::changed_lines(&text, &normalized);
    if changes.is_empty() {
        info!("normalized catalog differs from the source only in trailing whitespace");
    } else {
        info!(lines = changes.len(), "normalization changed lines");
        for change in changes.iter().take(SAMPLE_LIMIT) {
            debug!(line = change.line, before = %change.before, after = %change.after, "changed");
        }
    }

    // ─── 3) parse; a structural error stops here, before any write ──
    let parsed = catalog::parse_catalog(&text)
        .context("catalog format changed; no output files were written")?;

    // ─── 4) write outputs ────────────────────────────────────────────
    output::write_all(&config.output_paths(), &normalized, &parsed.records)?;

    // ─── 5) summary ──────────────────────────────────────────────────
    if !parsed.rejected.is_empty() {
        warn!(count = parsed.rejected.len(), "rows skipped");
        for err in parsed.rejected.iter().take(SAMPLE_LIMIT) {
            warn!("  {}", err);
        }
    }
    if parsed.fallback_rows > 0 {
        info!(
            rows = parsed.fallback_rows,
            "rows recovered by whitespace re-split"
        );
    }
    if outcome == FetchOutcome::AlreadyPresent {
        warn!(
            "{} already existed and was NOT downloaded; outputs were generated from it. \
             Delete it and run again to fetch the current catalog.",
            source_path.display()
        );
    }

    Ok(RunSummary {
        fetch: outcome,
        records: parsed.records.len(),
        rejected: parsed.rejected,
        fallback_rows: parsed.fallback_rows,
        changed_lines: changes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::SAMPLE;
    use crate::error::{CatalogError, RowProblem};
    use serde_json::Value;
    use std::path::Path;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    // nothing listens on the discard port, so requests fail fast
    const DEAD_URL: &str = "http://127.0.0.1:9/IAU-CSN.txt";

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().expect("client builds")
    }

    fn config_in(data_dir: &Path) -> Result<Config> {
        Config::from_lookup(|key| match key {
            "CSN_DATA_DIR" => Some(data_dir.display().to_string()),
            "CSN_SOURCE_URL" => Some(DEAD_URL.to_string()),
            _ => None,
        })
    }

    fn outputs_exist(config: &Config) -> [bool; 3] {
        let paths = config.output_paths();
        [paths.normalized.exists(), paths.json.exists(), paths.tsv.exists()]
    }

    #[tokio::test]
    async fn test_headerless_source_aborts_before_writing() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let config = config_in(dir.path())?;
        fs::write(config.source_path(), "# no table here\nPolaris  HR 424  UMi\n")?;

        let err = run(&config, &client())
            .await
            .expect_err("a catalog without a header must fail");

        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::HeaderNotFound { .. })
        ));
        assert_eq!(outputs_exist(&config), [false; 3]);
        // only the source is there
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_skipped_rows_still_succeed() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let config = config_in(dir.path())?;
        fs::write(config.source_path(), SAMPLE)?;

        let summary = run(&config, &client()).await?;

        assert_eq!(summary.fetch, FetchOutcome::AlreadyPresent);
        assert_eq!(summary.records, 5);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].problem, RowProblem::MissingName);
        assert_eq!(summary.fallback_rows, 0);
        assert_eq!(outputs_exist(&config), [true; 3]);

        let json: Vec<Value> = serde_json::from_str(&fs::read_to_string(config.output_paths().json)?)?;
        assert_eq!(json.len(), summary.records);
        assert_eq!(fs::read_to_string(config.source_path())?, SAMPLE);
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_leaves_no_data_dir() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let data_dir = dir.path().join("catalog_data");
        let config = config_in(&data_dir)?;

        assert!(run(&config, &client()).await.is_err());
        assert!(!data_dir.exists());
        Ok(())
    }
}
