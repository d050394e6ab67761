//! Run statistics.
//!
//! [`ScrapeStats`] counts what one scrape run touched. The pipeline is
//! single-threaded by contract, so plain counters suffice; the struct is
//! serializable so a summary can ride along in reports or logs.

use serde::{Deserialize, Serialize};

/// Counters for one scrape run.
///
/// # Examples
///
/// ```
/// use ps_scraper::ScrapeStats;
///
/// let mut stats = ScrapeStats::default();
/// stats.record_target();
/// stats.record_document(3);
/// assert_eq!(stats.targets, 1);
/// assert_eq!(stats.keys, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeStats {
    /// Targets processed (after test-target filtering).
    pub targets: u64,
    /// Documents successfully decoded.
    pub documents: u64,
    /// Matched files skipped because they could not be read or decoded.
    pub skipped: u64,
    /// Key/value pairs recorded into the table.
    pub keys: u64,
}

impl ScrapeStats {
    /// Records one processed target.
    #[inline]
    pub fn record_target(&mut self) {
        self.targets += 1;
    }

    /// Records one decoded document and the number of keys it contributed.
    #[inline]
    pub fn record_document(&mut self, keys: usize) {
        self.documents += 1;
        self.keys += keys as u64;
    }

    /// Records one skipped document.
    #[inline]
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }
}
