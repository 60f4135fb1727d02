// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use strum::EnumIter;

fn default_bolls_url() -> String {
    "https://bolls.life".to_string()
}
fn default_fhl_url() -> String {
    "https://bible.fhl.net".to_string()
}
fn default_user_agent() -> String {
    format!("lectio/{}", env!("CARGO_PKG_VERSION"))
}
fn default_max_redirects() -> usize {
    5
}
fn default_timeout() -> u64 {
    20
}
fn default_plan_year() -> i32 {
    2026
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Which public Bible-text service the reader talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Bolls,
    Fhl,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Bolls => write!(f, "bolls.life"),
            ProviderKind::Fhl => write!(f, "bible.fhl.net"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_bolls_url")]
    pub bolls_base_url: String,
    #[serde(default = "default_fhl_url")]
    pub fhl_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Year whose weekday layout the calendar uses; plan keys are "MM-DD".
    #[serde(default = "default_plan_year")]
    pub plan_year: i32,

    /// Overrides the detected UI language ("en", "zh-TW").
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            bolls_base_url: default_bolls_url(),
            fhl_base_url: default_fhl_url(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            request_timeout_secs: default_timeout(),
            plan_year: default_plan_year(),
            locale: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Loads the config, writing the defaults on first run.
    /// Syntax or permission problems are returned to the caller.
    pub fn load_or_init(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                let cfg = Config::default();
                if let Err(save_err) = cfg.save(ctx) {
                    log::warn!("Could not write default config: {}", save_err);
                }
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Base URL of the configured provider, without a trailing slash.
    pub fn provider_base_url(&self) -> &str {
        let url = match self.provider {
            ProviderKind::Bolls => &self.bolls_base_url,
            ProviderKind::Fhl => &self.fhl_base_url,
        };
        url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_is_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let ctx = TestContext::new();
        let cfg = Config::load_or_init(&ctx).unwrap();
        assert_eq!(cfg.provider, ProviderKind::Bolls);
        assert!(ctx.get_config_file_path().unwrap().exists());

        let reloaded = Config::load(&ctx).unwrap();
        assert_eq!(reloaded.plan_year, 2026);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "provider = \"fhl\"\nfhl_base_url = \"http://localhost:9/\"\n").unwrap();

        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.provider, ProviderKind::Fhl);
        assert_eq!(cfg.provider_base_url(), "http://localhost:9");
        assert_eq!(cfg.max_redirects, 5);
    }

    #[test]
    fn test_syntax_error_is_not_missing() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "provider = [").unwrap();

        let err = Config::load_or_init(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }
}
