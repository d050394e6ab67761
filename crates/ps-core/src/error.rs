//! Error types for the ps-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration
//! validation failures surfaced before a scrape run starts.

use camino::Utf8PathBuf;

/// Errors raised while validating a [`ScrapeConfig`](crate::ScrapeConfig).
///
/// These are always fatal: a run never starts with an invalid configuration.
///
/// # Examples
///
/// ```
/// use ps_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::InvalidPath {
///     path: Utf8PathBuf::from(""),
///     reason: "project path must not be empty".to_owned(),
/// };
/// assert!(error.to_string().contains("must not be empty"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`].
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
