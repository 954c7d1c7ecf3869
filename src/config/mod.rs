//! # Configuration Management Module
//!
//! TOML configuration for the `delve` binary, with defaults for every value so a
//! missing file or a partial file both work.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - dungeon size and optional fixed seed
//! - [`QuoteConfig`] - endpoint, JSON field, user agent and timeout for the quote fetcher
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use delve::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration from file, falling back to defaults when it does not exist
//!     let config = Config::load_or_default("delve.toml").await?;
//!     println!("Dungeon: {}x{}", config.game.width, config.game.height);
//!
//!     // Create default configuration
//!     Config::create_default("delve.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! width = 15
//! height = 11
//! # seed = 42
//!
//! [quote]
//! enabled = true
//! url = "https://api.whatdoestrumpthink.com/api/v1/quotes/random"
//! field = "message"
//! user_agent = "delve-quote/0.1"
//! timeout_seconds = 10
//!
//! [logging]
//! level = "warn"
//! # file = "delve.log"
//! ```
//!
//! Precedence: CLI args > Config file > Defaults

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::game::world::MIN_PLAYABLE_SIDE;

/// Largest accepted side length for the dungeon.
pub const MAX_SIDE: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed for reproducible dungeons; random when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 11,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Enable/disable the quote command
    pub enabled: bool,
    /// Endpoint returning a JSON object with the quote in `field`
    pub url: String,
    /// Name of the string field holding the quote
    pub field: String,
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://api.whatdoestrumpthink.com/api/v1/quotes/random".to_string(),
            field: "message".to_string(),
            user_agent: format!("delve-quote/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown strings fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults. A file that exists but does not
    /// parse or validate is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path).await
        } else {
            debug!("No config file at {}; using defaults", path);
            Ok(Config::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("width", self.game.width), ("height", self.game.height)] {
            if !(MIN_PLAYABLE_SIDE..=MAX_SIDE).contains(&side) {
                return Err(anyhow!(
                    "game.{} must be between {} and {}, got {}",
                    name,
                    MIN_PLAYABLE_SIDE,
                    MAX_SIDE,
                    side
                ));
            }
        }
        if self.quote.timeout_seconds == 0 {
            return Err(anyhow!("quote.timeout_seconds must be at least 1"));
        }
        if self.quote.url.trim().is_empty() {
            return Err(anyhow!("quote.url must not be empty"));
        }
        if self.quote.field.trim().is_empty() {
            return Err(anyhow!("quote.field must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.game.width, config.game.height), (15, 11));
        assert_eq!(config.quote.field, "message");
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[game]\nwidth = 21\n").unwrap();
        assert_eq!(config.game.width, 21);
        assert_eq!(config.game.height, 11);
        assert!(config.quote.enabled);
        assert_eq!(config.quote.timeout_seconds, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.game.height = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.game.width = MIN_PLAYABLE_SIDE - 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.game.width = MIN_PLAYABLE_SIDE;
        config.game.height = MIN_PLAYABLE_SIDE;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.game.width = MAX_SIDE + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.quote.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.quote.field = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_level_falls_back_to_warn() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
        let logging = LoggingConfig {
            level: "debug".to_string(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delve.toml");
        let path = path.to_str().unwrap();
        tokio_test::block_on(async {
            Config::create_default(path).await.unwrap();
            let loaded = Config::load(path).await.unwrap();
            assert_eq!(loaded.game.width, 15);
            assert_eq!(loaded.quote.url, QuoteConfig::default().url);
            assert!(loaded.game.seed.is_none());
        });
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config =
            tokio_test::block_on(Config::load_or_default(path.to_str().unwrap())).unwrap();
        assert_eq!(config.game.width, 15);
    }
}
