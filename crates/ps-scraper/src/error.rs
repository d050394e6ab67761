//! Error types for the ps-scraper crate.
//!
//! This module provides [`ScrapeError`], the top-level error of a scrape
//! run. Everything surfaced here is fatal; per-document problems are
//! handled inside the pipeline by skipping the file.

use camino::Utf8PathBuf;
use ps_core::ConfigError;
use ps_pbxproj::ProjectError;

/// Errors that abort a scrape run.
///
/// # Examples
///
/// ```
/// use ps_scraper::ScrapeError;
/// use ps_core::ConfigError;
///
/// let err = ScrapeError::from(ConfigError::invalid_option(
///     "resource_extension",
///     "must not be empty",
/// ));
/// assert!(err.to_string().contains("resource_extension"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The run configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The project descriptor could not be loaded or is malformed.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// The output file could not be created or written.
    #[error("failed to write output {path}: {source}")]
    Output {
        /// The output path that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Creates a new [`ScrapeError::Output`] error.
    #[inline]
    pub fn output(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_output_error_display() {
        let err = ScrapeError::output(
            "output.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("output.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_project_error_is_transparent() {
        let err = ScrapeError::from(ProjectError::Malformed("no objects table".to_owned()));
        assert_eq!(err.to_string(), "malformed project descriptor: no objects table");
    }
}
