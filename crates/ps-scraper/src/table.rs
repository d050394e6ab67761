//! The cross-target comparison table and its column order.
//!
//! [`Table`] is the single mutable aggregate of a scrape run: a three-level
//! mapping from document name to key to per-target value. It is owned by
//! the [`Scraper`](crate::Scraper), populated during one pass, and only
//! read afterwards.
//!
//! Sections and keys live in `BTreeMap`s, so rows iterate in lexical
//! order and repeated runs emit byte-identical output. Column order comes
//! from [`TargetList`]: the default target first when configured, then the
//! remaining targets in discovery order.

use std::collections::BTreeMap;

use ps_core::{FxHashMap, Value};

/// Per-target values recorded for one (section, key) pair.
pub type TargetValues = FxHashMap<String, Value>;

/// The aggregated comparison table: section -> key -> target -> value.
#[derive(Debug, Default)]
pub struct Table {
    sections: BTreeMap<String, BTreeMap<String, TargetValues>>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value for one (section, key, target) triple.
    ///
    /// A later write to the same triple overwrites the earlier one
    /// (last-processed wins), which only matters if the descriptor carries
    /// duplicate target names.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        target: impl Into<String>,
        value: Value,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .entry(key.into())
            .or_default()
            .insert(target.into(), value);
    }

    /// Returns the value recorded for a triple, if any.
    #[must_use]
    pub fn value(&self, section: &str, key: &str, target: &str) -> Option<&Value> {
        self.sections.get(section)?.get(key)?.get(target)
    }

    /// Iterates all rows as `(section, key, per-target values)` in the
    /// deterministic emission order: lexical by section, then by key.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str, &TargetValues)> {
        self.sections.iter().flat_map(|(section, keys)| {
            keys.iter()
                .map(move |(key, values)| (section.as_str(), key.as_str(), values))
        })
    }

    /// Returns the number of rows (unique section/key pairs).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no values have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The ordered list of table columns.
///
/// Targets register in discovery order; the default target, when
/// configured and actually discovered, is forced to the front. A name
/// registers only once, so duplicate target names never produce duplicate
/// columns.
#[derive(Debug, Clone, Default)]
pub struct TargetList {
    names: Vec<String>,
    default_target: Option<String>,
}

impl TargetList {
    /// Creates an empty list with an optional default target name.
    #[inline]
    #[must_use]
    pub fn new(default_target: Option<String>) -> Self {
        Self {
            names: Vec::new(),
            default_target,
        }
    }

    /// Registers a discovered target name.
    pub fn register(&mut self, name: &str) {
        if self.names.iter().any(|existing| existing == name) {
            return;
        }
        if self.is_default(name) {
            self.names.insert(0, name.to_owned());
        } else {
            self.names.push(name.to_owned());
        }
    }

    /// Returns the column names in emission order.
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the configured default target name, if any.
    #[inline]
    #[must_use]
    pub fn default_target(&self) -> Option<&str> {
        self.default_target.as_deref()
    }

    /// Returns `true` if `name` is the configured default target.
    #[inline]
    #[must_use]
    pub fn is_default(&self, name: &str) -> bool {
        self.default_target.as_deref() == Some(name)
    }

    /// Returns the number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no target has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = Table::new();
        table.insert("Info", "CFBundleVersion", "App", Value::from("1.0"));

        assert_eq!(
            table.value("Info", "CFBundleVersion", "App"),
            Some(&Value::from("1.0"))
        );
        assert_eq!(table.value("Info", "CFBundleVersion", "Ext"), None);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_last_write_wins_per_triple() {
        let mut table = Table::new();
        table.insert("Info", "CFBundleVersion", "App", Value::from("1.0"));
        table.insert("Info", "CFBundleVersion", "App", Value::from("2.0"));

        assert_eq!(
            table.value("Info", "CFBundleVersion", "App"),
            Some(&Value::from("2.0"))
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_rows_iterate_in_lexical_order() {
        let mut table = Table::new();
        table.insert("Settings", "Theme", "App", Value::from("dark"));
        table.insert("Info", "CFBundleVersion", "App", Value::from("1.0"));
        table.insert("Info", "CFBundleName", "App", Value::from("App"));

        let rows: Vec<_> = table
            .rows()
            .map(|(section, key, _)| (section, key))
            .collect();
        assert_eq!(
            rows,
            [
                ("Info", "CFBundleName"),
                ("Info", "CFBundleVersion"),
                ("Settings", "Theme"),
            ]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn test_target_list_default_comes_first() {
        let mut targets = TargetList::new(Some("App".to_owned()));
        targets.register("AppExtension");
        targets.register("Widget");
        targets.register("App");

        assert_eq!(targets.names(), ["App", "AppExtension", "Widget"]);
        assert!(targets.is_default("App"));
        assert!(!targets.is_default("Widget"));
    }

    #[test]
    fn test_target_list_discovery_order_without_default() {
        let mut targets = TargetList::new(None);
        targets.register("Widget");
        targets.register("App");

        assert_eq!(targets.names(), ["Widget", "App"]);
        assert_eq!(targets.default_target(), None);
    }

    #[test]
    fn test_target_list_registers_a_name_once() {
        let mut targets = TargetList::new(None);
        targets.register("App");
        targets.register("App");

        assert_eq!(targets.len(), 1);
    }
}
