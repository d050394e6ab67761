//! Error types for the ps-pbxproj crate.
//!
//! This module provides [`ProjectError`], covering both structural failures
//! that abort a run (unreadable or malformed descriptor) and per-document
//! failures the pipeline recovers from by skipping the file.

use camino::Utf8PathBuf;

use crate::graph::ObjectId;

/// Errors that can occur while loading the descriptor or its documents.
///
/// # Error Recovery Strategy
///
/// - **Descriptor errors** ([`ProjectError::Descriptor`], [`Malformed`],
///   [`AmbiguousGroup`], [`GroupCycle`]): fatal - the object graph cannot
///   be trusted, so the run aborts before any output is produced.
/// - **Document errors** ([`ProjectError::Document`], [`DocumentShape`]):
///   recoverable - log a warning, skip the file, continue with the
///   remaining files and targets.
///
/// [`Malformed`]: ProjectError::Malformed
/// [`AmbiguousGroup`]: ProjectError::AmbiguousGroup
/// [`GroupCycle`]: ProjectError::GroupCycle
/// [`DocumentShape`]: ProjectError::DocumentShape
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The project descriptor could not be read or decoded.
    #[error("failed to read project descriptor {path}: {source}")]
    Descriptor {
        /// The descriptor path that failed.
        path: Utf8PathBuf,
        /// The underlying decode error.
        #[source]
        source: plist::Error,
    },

    /// The descriptor decoded but its shape is not a usable object graph.
    #[error("malformed project descriptor: {0}")]
    Malformed(String),

    /// One object id is claimed as a child by two different groups, so the
    /// file's location in the group tree is undecidable.
    #[error("object {child} is a child of both group {first} and group {second}")]
    AmbiguousGroup {
        /// The contested child reference.
        child: ObjectId,
        /// The group that claimed the child first.
        first: ObjectId,
        /// The group that claimed it again.
        second: ObjectId,
    },

    /// Group membership forms a cycle, so path resolution cannot terminate.
    #[error("group membership cycle detected at {reference}")]
    GroupCycle {
        /// A group participating in the cycle.
        reference: ObjectId,
    },

    /// A matched resource file could not be read or decoded.
    #[error("failed to read document {path}: {source}")]
    Document {
        /// The document path that failed.
        path: Utf8PathBuf,
        /// The underlying decode error.
        #[source]
        source: plist::Error,
    },

    /// A matched resource file decoded to something other than a dictionary.
    #[error("document {path} is not a key-value dictionary")]
    DocumentShape {
        /// The document path that failed.
        path: Utf8PathBuf,
    },
}

impl ProjectError {
    /// Returns `true` if this error is recoverable (the scrape continues).
    ///
    /// Recoverable errors are per-document problems; everything touching
    /// the descriptor itself is fatal.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Document { .. } | Self::DocumentShape { .. })
    }

    /// Returns `true` if this error is fatal (the run aborts).
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}
