//! File logger setup. The terminal belongs to the TUI, so log lines go to
//! `lectio.log` in the cache directory.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;

/// Env var that overrides the configured log level.
pub const LOG_ENV: &str = "LECTIO_LOG";

/// Resolves the effective level: env var first, then config, then `Info`.
pub fn resolve_level(configured: &str, env_value: Option<&str>) -> LevelFilter {
    env_value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .or_else(|| LevelFilter::from_str(configured.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Level for this process, honoring `LECTIO_LOG` when set.
pub fn effective_level(configured: &str) -> LevelFilter {
    let env_value = std::env::var(LOG_ENV).ok();
    resolve_level(configured, env_value.as_deref())
}

pub fn init(ctx: &dyn AppContext, configured_level: &str) -> Result<()> {
    let level = effective_level(configured_level);

    let path = ctx
        .get_log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log path"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("lectio")
        .build();

    WriteLogger::init(level, config, file).context("Logger already initialized")?;
    log::info!("lectio v{} starting (log level {})", env!("CARGO_PKG_VERSION"), level);
    Ok(())
}
