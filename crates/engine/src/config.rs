//! Engine configuration loading from logview.toml.

use events::DEFAULT_CAPACITY;
use filter::FilterRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Delivery, OrderBy, SortColumn, SortDirection};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Display name of this engine instance.
    #[serde(default = "default_name")]
    pub name: String,

    /// Number of events retained before the oldest is evicted.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Separator used to split source file paths into tree segments.
    #[serde(default = "default_file_separator")]
    pub file_separator: char,

    /// Column the presentation layer sorts by.
    #[serde(default = "default_order_by")]
    pub order_by: String,

    #[serde(default = "default_ascending")]
    pub ascending: bool,

    /// How notifications reach a presentation sink on another thread.
    #[serde(default)]
    pub delivery: Delivery,

    /// Admission rules.
    #[serde(default)]
    pub filter: FilterRules,
}

fn default_name() -> String {
    "default".to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_file_separator() -> char {
    std::path::MAIN_SEPARATOR
}

fn default_order_by() -> String {
    SortColumn::Id.name().to_string()
}

fn default_ascending() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            capacity: default_capacity(),
            file_separator: default_file_separator(),
            order_by: default_order_by(),
            ascending: default_ascending(),
            delivery: Delivery::default(),
            filter: FilterRules::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured initial sort order.
    pub fn order(&self) -> OrderBy {
        OrderBy {
            column: SortColumn::from_name(&self.order_by),
            direction: if self.ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::Level;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::parse("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.capacity, 10_000);
        assert_eq!(config.order(), OrderBy::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
name = "services"
capacity = 500
file_separator = "\\"
order_by = "Level"
ascending = false
delivery = "fire_and_forget"

[filter]
min_level = "info"

[filter.deny]
loggers = ["Noisy"]
"#;
        let config = EngineConfig::parse(toml).unwrap();
        assert_eq!(config.name, "services");
        assert_eq!(config.capacity, 500);
        assert_eq!(config.file_separator, '\\');
        assert_eq!(config.delivery, Delivery::FireAndForget);
        assert_eq!(config.filter.min_level, Some(Level::Info));
        assert_eq!(
            config.order(),
            OrderBy {
                column: SortColumn::Level,
                direction: SortDirection::Descending,
            }
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            EngineConfig::parse("capacity = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_multi_char_separator_rejected() {
        assert!(matches!(
            EngineConfig::parse(r#"file_separator = "//""#),
            Err(ConfigError::Parse(_))
        ));
    }
}
