//! Loading `GameConfig` from JSON files.
//!
//! Missing fields fall back to defaults, so a tuning file only needs the
//! values it changes:
//!
//! ```json
//! { "obstacle_speed": 14.0, "seed": 7 }
//! ```

use std::path::Path;

use spirit_logic::config::{ConfigError, GameConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Parse and validate a JSON tuning document.
pub fn parse_config(json: &str) -> Result<GameConfig, ConfigLoadError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a JSON tuning file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = parse_config(r#"{ "obstacle_speed": 14.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.obstacle_speed, 14.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.collectible_speed, GameConfig::default().collectible_speed);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            parse_config(r#"{ "max_obstacles": 2 }"#),
            Err(ConfigLoadError::Invalid(ConfigError::CapBelowInitial { .. }))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            parse_config("{ obstacle_speed: "),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/definitely/not/here.json"),
            Err(ConfigLoadError::Io(_))
        ));
    }
}
