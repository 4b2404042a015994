use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

/// Zero disables a limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_input_bytes: u64,
    pub max_pixels: u64,
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "logging.level must not be empty".to_string(),
            });
        }

        if self.limits.max_input_bytes != 0 && self.limits.max_input_bytes < 16 {
            return Err(AppError::ConfigError {
                message: "limits.max_input_bytes must be 0 (unlimited) or at least 16".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 256 * 1024 * 1024,
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}
