//! Driver configuration.
//!
//! Drivers run with `DriverConfig::default()` unless given another
//! config. Configs can also be loaded from JSON, where every field is
//! optional.

use crate::error::ConfigurationError;
use crate::verify::OrderMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every driver.
///
/// # Example
///
/// ```rust
/// use mrtest::config::DriverConfig;
///
/// let config = DriverConfig::from_json_str(r#"{ "order_sensitive": false }"#).unwrap();
/// assert!(!config.order_sensitive);
/// assert!(config.label.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Whether `run_test` compares outputs positionally
    pub order_sensitive: bool,

    /// Name attached to log events for this fixture
    pub label: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            order_sensitive: true,
            label: None,
        }
    }
}

impl DriverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|source| ConfigurationError::InvalidConfig { source })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json_str(&contents)
    }

    pub fn with_order_sensitive(mut self, order_sensitive: bool) -> Self {
        self.order_sensitive = order_sensitive;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn order_mode(&self) -> OrderMode {
        OrderMode::from_sensitivity(self.order_sensitive)
    }

    pub(crate) fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_order_sensitive() {
        let config = DriverConfig::default();
        assert!(config.order_sensitive);
        assert_eq!(config.order_mode(), OrderMode::Ordered);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = DriverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn invalid_json_is_a_configuration_error() {
        let err = DriverConfig::from_json_str("{ order_sensitive: ").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfig { .. }));
        assert!(err.to_string().starts_with("Invalid driver configuration"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "order_sensitive": false, "label": "word count" }}"#).unwrap();

        let config = DriverConfig::from_path(file.path()).unwrap();
        assert_eq!(config.order_mode(), OrderMode::Unordered);
        assert_eq!(config.label_or("driver"), "word count");
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = DriverConfig::from_path("/nonexistent/driver.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::ReadConfig { .. }));
        assert!(err.to_string().contains("/nonexistent/driver.json"));
    }

    #[test]
    fn builder_methods() {
        let config = DriverConfig::default()
            .with_order_sensitive(false)
            .with_label("fixture");
        assert!(!config.order_sensitive);
        assert_eq!(config.label.as_deref(), Some("fixture"));
    }
}
