use std::path::{Path, PathBuf};
use std::time::Duration;

use ember_client::PlayerConfig;
use ember_common::keys::key;
use ember_common::{KeyCode, KeySequence, SequenceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid exit_keys: {0}")]
    ExitKeys(#[from] SequenceError),
    #[error("ticks_per_second must be positive and finite")]
    TickRate,
    #[error("tick_budget_ms must be between 0 and 60000, got {0}")]
    TickBudget(f64),
}

/// Upper bound for `tick_budget_ms`.
pub const MAX_TICK_BUDGET_MS: f64 = 60_000.0;

/// Desktop settings, loaded from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub ticks_per_second: f64,
    /// Ticks run per frame at most; the rest of the backlog is dropped.
    pub max_ticks_per_frame: u32,
    /// Warn when a single ticker update takes longer than this.
    pub tick_budget_ms: f64,
    pub scroll_pixels_per_line: f64,
    /// Keys that, held together, close the window.
    pub exit_keys: Vec<KeyCode>,
    pub player: PlayerConfig,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            title: "Ember".to_string(),
            width: 1280,
            height: 720,
            ticks_per_second: 60.0,
            max_ticks_per_frame: 5,
            tick_budget_ms: 4.0,
            scroll_pixels_per_line: 20.0,
            exit_keys: vec![key::LEFT_CONTROL, key::Q],
            player: PlayerConfig::default(),
        }
    }
}

impl DesktopConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            None => Self::default(),
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ticks_per_second > 0.0 && self.ticks_per_second.is_finite()) {
            return Err(ConfigError::TickRate);
        }
        if !(0.0..=MAX_TICK_BUDGET_MS).contains(&self.tick_budget_ms) {
            return Err(ConfigError::TickBudget(self.tick_budget_ms));
        }
        self.exit_sequence()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> f64 {
        1.0 / self.ticks_per_second
    }

    pub fn tick_budget(&self) -> Duration {
        Duration::from_secs_f64(self.tick_budget_ms.clamp(0.0, MAX_TICK_BUDGET_MS) / 1000.0)
    }

    pub fn exit_sequence(&self) -> Result<KeySequence, SequenceError> {
        KeySequence::try_new(&self.exit_keys)
    }

    /// Player settings with the tick delta matching the tick rate.
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            tick_delta: self.tick_interval() as f32,
            ..self.player
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DesktopConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exit_sequence().unwrap().len(), 2);
        assert!((config.player_config().tick_delta - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: DesktopConfig =
            serde_json::from_str(r#"{ "title": "Test", "player": { "velocity": 9.0 } }"#).unwrap();
        assert_eq!(config.title, "Test");
        assert_eq!(config.width, 1280);
        assert_eq!(config.player.velocity, 9.0);
        assert_eq!(config.exit_keys, vec![key::LEFT_CONTROL, key::Q]);
    }

    #[test]
    fn empty_exit_keys_are_rejected() {
        let config = DesktopConfig {
            exit_keys: Vec::new(),
            ..DesktopConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ExitKeys(_))));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = DesktopConfig {
            ticks_per_second: 0.0,
            ..DesktopConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TickRate)));
    }

    #[test]
    fn unbounded_tick_budget_is_rejected() {
        for budget in [1e300, -1.0, f64::NAN, f64::INFINITY] {
            let config = DesktopConfig {
                tick_budget_ms: budget,
                ..DesktopConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::TickBudget(_))),
                "{budget}"
            );
        }
        let config = DesktopConfig {
            tick_budget_ms: MAX_TICK_BUDGET_MS,
            ..DesktopConfig::default()
        };
        assert_eq!(config.tick_budget(), Duration::from_secs(60));
    }

    #[test]
    fn infinite_tick_rate_is_rejected() {
        let config = DesktopConfig {
            ticks_per_second: f64::INFINITY,
            ..DesktopConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TickRate)));
    }

    #[test]
    fn load_reports_huge_tick_budget() {
        let path = std::env::temp_dir().join(format!("ember-budget-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "tick_budget_ms": 1e300 }"#).unwrap();
        let result = DesktopConfig::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::TickBudget(b)) if b == 1e300));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DesktopConfig::load(Some(Path::new("/nonexistent/ember.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
