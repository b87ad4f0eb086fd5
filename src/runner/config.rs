//! Runtime configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::runner::ds::error::ConfigError;

pub const DEFAULT_MAX_PROTOTYPE_DEPTH: usize = 256;
pub const DEFAULT_OBJECT_PLACEHOLDER: &str = "[object Object]";

/// Configuration for one script environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Maximum number of prototype links followed while resolving a property.
    pub max_prototype_depth: usize,
    /// String produced when an object has no usable `toString`.
    pub object_placeholder: String,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            max_prototype_depth: DEFAULT_MAX_PROTOTYPE_DEPTH,
            object_placeholder: DEFAULT_OBJECT_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_max_prototype_depth(mut self, depth: usize) -> Self {
        self.max_prototype_depth = depth;
        self
    }

    pub fn with_object_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.object_placeholder = placeholder.into();
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// max_prototype_depth = 64
    /// object_placeholder = "[object Object]"
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = RuntimeConfig::parse("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = RuntimeConfig::parse("max_prototype_depth = 8\n").unwrap();
        assert_eq!(config.max_prototype_depth, 8);
        assert_eq!(config.object_placeholder, DEFAULT_OBJECT_PLACEHOLDER);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let err = RuntimeConfig::parse("max_prototype_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
