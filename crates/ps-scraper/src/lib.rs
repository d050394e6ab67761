//! Aggregation pipeline for the plist-scraper tool.
//!
//! This crate turns a loaded project descriptor into the exported
//! comparison CSV. It combines:
//!
//! - [`Scraper`]: the single-pass aggregator driving the per-target loop
//! - [`Table`] / [`TargetList`]: the comparison table and its column order
//! - [`diff`]: the cell-level suppression rules against the default target
//! - [`CsvEmitter`]: CSV serialization with per-field quoting
//! - [`ScrapeStats`]: run counters
//!
//! # Example
//!
//! ```ignore
//! use ps_core::ScrapeConfig;
//! use ps_scraper::Scraper;
//!
//! let config = ScrapeConfig {
//!     project_path: "App.xcodeproj".into(),
//!     default_target: Some("App".to_owned()),
//!     ..ScrapeConfig::default()
//! };
//!
//! let scraper = Scraper::from_config(config)?;
//! let outcome = scraper.scrape();
//! scraper.export_csv(&outcome)?;
//! # Ok::<(), ps_scraper::ScrapeError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scraper (main entry point)
//!     │
//!     ├── XcodeProject (ps-pbxproj: resources + path resolution)
//!     │
//!     ├── Table + TargetList (aggregate state, owned by the run)
//!     │
//!     ├── diff (cell suppression vs. the default target)
//!     │
//!     └── CsvEmitter (serialization)
//! ```
//!
//! # Failure Model
//!
//! The pass over targets is infallible: a document that cannot be read or
//! decoded is logged, counted, and skipped. Only descriptor loading and
//! output writing can abort, both surfaced as [`ScrapeError`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod report;
mod scraper;
mod stats;
mod table;

pub use error::ScrapeError;
pub use report::CsvEmitter;
pub use scraper::{ScrapeOutcome, Scraper};
pub use stats::ScrapeStats;
pub use table::{Table, TargetList, TargetValues};
