//! Prints the full analytics report for a JSON array of reading records.
//!
//! Usage: `readlog_report <records.json>`
//! Logging: RUST_LOG (default `readlog=info,warn`).

use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use readlog_influence::{Analyzer, AnalyticsConfig, ReadingRecord};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("readlog=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    // .env is optional; READLOG_CONFIG_PATH / READLOG_TOP_N may live there.
    let _ = dotenvy::dotenv();
    init_tracing();

    let path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: readlog_report <records.json>")?;

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    let records: Vec<ReadingRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing records in {}", path.display()))?;

    let config = AnalyticsConfig::load_default()?;
    let report = Analyzer::from_config(config).analyze(&records);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
