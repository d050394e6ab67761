//! Core types, errors, and utilities for the plist-scraper tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`Value`] and [`ValueKind`] for dynamically-typed property-list content
//! - [`ScrapeConfig`] describing one scrape run
//! - [`ConfigError`] for configuration validation failures
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std for the
//!   string-keyed maps this tool is built on)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod value;

pub use config::ScrapeConfig;
pub use error::ConfigError;
pub use hash::{fx_hash_map_with_capacity, FxHashMap, FxHashSet};
pub use value::{Value, ValueKind};
