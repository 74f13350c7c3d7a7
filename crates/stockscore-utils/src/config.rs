//! Application-level configuration

use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stockscore".to_string(),
            environment: "development".to_string(),
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Overlay `STOCKSCORE_ENV` and `STOCKSCORE_LOG_FORMAT` onto the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(env) = std::env::var("STOCKSCORE_ENV") {
            config.environment = env;
        }
        if let Some(format) = std::env::var("STOCKSCORE_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.log_format = format;
        }
        config
    }
}
