//! Xcode project descriptor graph for the plist-scraper tool.
//!
//! This crate decodes a project descriptor (a `.pbxproj` property list)
//! into a navigable, typed object graph and answers the traversal
//! questions the scrape pipeline asks:
//!
//! - **Path resolution**: where a file element lives on disk, computed by
//!   walking the group tree bottom-up over a precomputed parent index.
//! - **Resource lookup**: which files of a given extension a target's
//!   resources build phase bundles, in phase order.
//! - **Settings lookup**: a target's named build configuration and its
//!   `INFOPLIST_FILE` setting.
//! - **Document loading**: decoding a matched resource file into the
//!   workspace's [`Value`](ps_core::Value) union.
//!
//! # Overview
//!
//! The main entry point is [`XcodeProject`]:
//!
//! ```ignore
//! use camino::Utf8Path;
//! use ps_pbxproj::{document, XcodeProject};
//!
//! let project = XcodeProject::open(Utf8Path::new("App.xcodeproj"))?;
//!
//! for target in project.targets() {
//!     for file in project.resources(target, "plist") {
//!         if let Some(path) = project.resolve_path(file) {
//!             let doc = document::load_document(&path)?;
//!             println!("{}: {} keys", path, doc.len());
//!         }
//!     }
//! }
//! # Ok::<(), ps_pbxproj::ProjectError>(())
//! ```
//!
//! # Structural Validation
//!
//! The group tree is validated once at load time: an object claimed as a
//! child by two groups, or a membership cycle, fails construction with a
//! fatal [`ProjectError`]. Path resolution is therefore a plain bounded
//! walk.
//!
//! # Error Recovery
//!
//! Descriptor problems are fatal; per-document problems
//! ([`ProjectError::is_recoverable`]) are skipped by callers so one broken
//! resource never aborts a run.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
mod graph;
mod project;

pub use document::{document_name, load_document, Document};
pub use error::ProjectError;
pub use graph::{
    BuildConfiguration, BuildFile, ConfigurationList, FileReference, Group, ObjectId,
    ResourcesPhase, Target,
};
pub use project::XcodeProject;
