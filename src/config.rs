//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the simulated submission delay
pub const SUBMIT_DELAY_ENV: &str = "REGFORM_SUBMIT_DELAY_MS";

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
const DEFAULT_EMAIL_DEBOUNCE_MS: u64 = 300;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Where exported JSON files are written (current directory when unset)
    pub export_dir: Option<PathBuf>,
    /// Delay of the simulated submission
    pub submit_delay_ms: Option<u64>,
    /// Quiet period before the email field is re-checked while typing
    pub email_debounce_ms: Option<u64>,
    /// Ease the progress bar between steps
    pub animate_progress: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "regform", "regform-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env(std::env::var(SUBMIT_DELAY_ENV).ok().as_deref());
        Ok(config)
    }

    fn apply_env(&mut self, submit_delay: Option<&str>) {
        let Some(raw) = submit_delay else {
            return;
        };
        match raw.trim().parse() {
            Ok(ms) => self.submit_delay_ms = Some(ms),
            Err(_) => tracing::warn!("Ignoring {SUBMIT_DELAY_ENV}={raw:?}: not a number"),
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    pub fn email_debounce(&self) -> Duration {
        Duration::from_millis(self.email_debounce_ms.unwrap_or(DEFAULT_EMAIL_DEBOUNCE_MS))
    }

    pub fn animate_progress(&self) -> bool {
        self.animate_progress.unwrap_or(true)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.export_dir.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.email_debounce(), Duration::from_millis(300));
        assert!(config.animate_progress());
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            submit_delay_ms: Some(10),
            email_debounce_ms: Some(250),
            animate_progress: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"submit_delay_ms": 20, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay(), Duration::from_millis(20));
    }

    mod env_override {
        use super::*;

        #[test]
        fn test_numeric_value_wins() {
            let mut config = TuiConfig {
                submit_delay_ms: Some(900),
                ..Default::default()
            };
            config.apply_env(Some(" 0 "));
            assert_eq!(config.submit_delay(), Duration::ZERO);
        }

        #[test]
        fn test_garbage_is_ignored() {
            let mut config = TuiConfig {
                submit_delay_ms: Some(900),
                ..Default::default()
            };
            config.apply_env(Some("soon"));
            assert_eq!(config.submit_delay_ms, Some(900));
        }

        #[test]
        fn test_unset_keeps_file_value() {
            let mut config = TuiConfig::default();
            config.apply_env(None);
            assert!(config.submit_delay_ms.is_none());
        }
    }

    #[test]
    fn test_load_returns_ok_when_no_file() {
        assert!(TuiConfig::load().is_ok());
    }
}
