use crate::board::MIN_BOARD_SIZE;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for the search and the session's capacity checks.
///
/// Every field has a default, so a TOML document only needs the keys it
/// wants to change:
///
/// ```
/// use tictactoe_minimax::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("node_limit = 50000").unwrap();
/// assert_eq!(config.node_limit, Some(50_000));
/// assert_eq!(config.max_optimal_board_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Largest board size on which optimal play may be requested.
    pub max_optimal_board_size: usize,
    /// Answer the empty 3×3 board with the four corners instead of searching.
    pub opening_book: bool,
    /// Prune with alpha-beta bounds; disabling it gives plain minimax.
    pub alpha_beta_pruning: bool,
    /// Abort a search after visiting this many nodes.
    pub node_limit: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_optimal_board_size: MIN_BOARD_SIZE,
            opening_book: true,
            alpha_beta_pruning: true,
            node_limit: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_optimal_board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::OptimalSizeTooSmall {
                value: self.max_optimal_board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.node_limit == Some(0) {
            return Err(ConfigError::ZeroNodeLimit);
        }
        Ok(())
    }

    /// Whether optimal play is allowed on a board of this size.
    pub fn allows_optimal(&self, size: usize) -> bool {
        size <= self.max_optimal_board_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.allows_optimal(3));
        assert!(!config.allows_optimal(4));
    }

    #[test]
    fn all_fields_parse() {
        let text = r#"
            max_optimal_board_size = 4
            opening_book = false
            alpha_beta_pruning = false
            node_limit = 1000
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.max_optimal_board_size, 4);
        assert!(!config.opening_book);
        assert!(!config.alpha_beta_pruning);
        assert_eq!(config.node_limit, Some(1000));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("max_optimal_board_size = 2"),
            Err(ConfigError::OptimalSizeTooSmall { value: 2, min: 3 })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("node_limit = 0"),
            Err(ConfigError::ZeroNodeLimit)
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("depth = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
