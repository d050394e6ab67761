//! Configuration for a scrape run.
//!
//! [`ScrapeConfig`] captures everything one run needs: where the project
//! descriptor lives, which target is the comparison baseline, which build
//! configuration to consult for setting lookups, and where the CSV goes.
//!
//! All fields have sensible defaults and round-trip through serde, so a
//! config can be constructed programmatically or loaded from JSON.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for one scrape run.
///
/// # Examples
///
/// ```
/// use ps_core::ScrapeConfig;
/// use camino::Utf8PathBuf;
///
/// let config = ScrapeConfig {
///     project_path: Utf8PathBuf::from("App.xcodeproj"),
///     default_target: Some("App".to_owned()),
///     ..ScrapeConfig::default()
/// };
///
/// assert_eq!(config.configuration, "Debug");
/// assert!(config.ignore_tests);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Path to the `.xcodeproj` bundle or the `project.pbxproj` inside it.
    pub project_path: Utf8PathBuf,

    /// Name of the target treated as the default/baseline column.
    ///
    /// `None` means no default-column treatment: every cell shows its own
    /// value and nothing is suppressed as redundant.
    pub default_target: Option<String>,

    /// Build configuration consulted for configuration-scoped settings
    /// (the `INFOPLIST_FILE` fallback), typically `Debug` or `Release`.
    pub configuration: String,

    /// Skip targets whose name contains `Tests`.
    pub ignore_tests: bool,

    /// File extension of the resources to collect, without the leading dot.
    pub resource_extension: String,

    /// Where the CSV is written.
    pub output_path: Utf8PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            project_path: Utf8PathBuf::new(),
            default_target: None,
            configuration: "Debug".to_owned(),
            ignore_tests: true,
            resource_extension: "plist".to_owned(),
            output_path: Utf8PathBuf::from("output.csv"),
        }
    }
}

impl ScrapeConfig {
    /// Checks the configuration for structurally invalid values.
    ///
    /// Filesystem existence is deliberately not checked here; that is the
    /// caller's concern at startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the project path is empty, the extension
    /// is empty or carries a leading dot, the configuration name is empty,
    /// or an empty default target name was supplied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_path.as_str().is_empty() {
            return Err(ConfigError::InvalidPath {
                path: self.project_path.clone(),
                reason: "project path must not be empty".to_owned(),
            });
        }

        if self.resource_extension.is_empty() {
            return Err(ConfigError::invalid_option(
                "resource_extension",
                "must not be empty",
            ));
        }
        if self.resource_extension.starts_with('.') {
            return Err(ConfigError::invalid_option(
                "resource_extension",
                "must not include the leading dot",
            ));
        }

        if self.configuration.is_empty() {
            return Err(ConfigError::invalid_option(
                "configuration",
                "must not be empty",
            ));
        }

        if matches!(self.default_target.as_deref(), Some("")) {
            return Err(ConfigError::invalid_option(
                "default_target",
                "must not be empty when supplied",
            ));
        }

        if self.output_path.as_str().is_empty() {
            return Err(ConfigError::InvalidPath {
                path: self.output_path.clone(),
                reason: "output path must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ScrapeConfig {
        ScrapeConfig {
            project_path: Utf8PathBuf::from("App.xcodeproj"),
            ..ScrapeConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.configuration, "Debug");
        assert_eq!(config.resource_extension, "plist");
        assert_eq!(config.output_path, Utf8PathBuf::from("output.csv"));
        assert!(config.ignore_tests);
        assert!(config.default_target.is_none());
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_project_path() {
        let config = ScrapeConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let config = ScrapeConfig {
            resource_extension: ".plist".to_owned(),
            ..valid_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("leading dot"));
    }

    #[test]
    fn test_validate_rejects_empty_default_target() {
        let config = ScrapeConfig {
            default_target: Some(String::new()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ScrapeConfig {
            default_target: Some("App".to_owned()),
            ..valid_config()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ScrapeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_deserialize_fills_missing_fields_with_defaults() {
        let json = r#"{"project_path": "App.xcodeproj", "configuration": "Release"}"#;
        let config: ScrapeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.configuration, "Release");
        assert_eq!(config.resource_extension, "plist");
        assert!(config.ignore_tests);
    }
}
