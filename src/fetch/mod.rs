// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::output::write_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: usize },
    /// A local copy existed; it was left untouched.
    AlreadyPresent,
}

async fn get_bytes(client: &Client, url: &Url) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);
    let bytes = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .bytes()
        .await
        .with_context(|| format!("Reading body from {}", url))?;
    Ok(bytes.to_vec())
}

/// Download `url` to `dest` unless `dest` already exists.
///
/// The body is fully read before anything touches the disk, so a
/// transport error leaves no file behind.
#[instrument(level = "info", skip_all, fields(url = %url, dest = %dest.display()))]
pub async fn ensure_source(client: &Client, url: &Url, dest: &Path) -> Result<FetchOutcome> {
    let present = fs::try_exists(dest)
        .await
        .with_context(|| format!("checking for an existing {}", dest.display()))?;
    if present {
        warn!(
            "{} already exists. NOT downloading; delete it to fetch the current catalog",
            dest.display()
        );
        return Ok(FetchOutcome::AlreadyPresent);
    }

    info!("Downloading star names from WGSN...");
    let body = get_bytes(client, url).await?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {:?}", parent))?;
    }
    write_atomic(dest, &body)?;
    info!(bytes = body.len(), "saved catalog");

    Ok(FetchOutcome::Downloaded { bytes: body.len() })
}
