use anyhow::Result;
use reqwest::Client;
use starnames::{config::Config, pipeline};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure; directories are created on first write ───────
    let config = Config::from_env()?;
    let client = Client::builder()
        .user_agent(concat!("starnames/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // ─── 3) fetch, parse, write ──────────────────────────────────────
    let summary = pipeline::run(&config, &client).await?;

    info!(
        records = summary.records,
        skipped = summary.rejected.len(),
        "all done"
    );
    Ok(())
}
