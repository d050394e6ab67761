//! Typed objects of the project descriptor graph.
//!
//! A descriptor is a flat table of objects keyed by stable identifiers,
//! each tagged with an `isa` class. This module defines the subset of
//! classes the scraper traverses: targets, their build phases, the
//! group/file tree, and build configurations. Everything is immutable once
//! loaded; the graph is read-only to the rest of the pipeline.

use std::fmt;

use ps_core::{FxHashMap, Value};
use smallvec::SmallVec;

/// A stable identifier of one object in the descriptor.
///
/// Uses a newtype over the raw identifier string for type safety - an
/// `ObjectId` cannot be confused with a target name or a file path.
///
/// # Examples
///
/// ```
/// use ps_pbxproj::ObjectId;
///
/// let id = ObjectId::new("24AB00FF1C8E");
/// assert_eq!(id.as_str(), "24AB00FF1C8E");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Creates an object id from a raw identifier string.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ObjectId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A named build unit that owns build phases and produces one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Identifier of this target in the object table.
    pub id: ObjectId,

    /// The target's name, used for table columns and test filtering.
    pub name: String,

    /// Ordered build-phase references.
    ///
    /// Targets rarely carry more than a handful of phases, so a `SmallVec`
    /// keeps the list inline.
    pub build_phases: SmallVec<[ObjectId; 8]>,

    /// Reference to the target's configuration list, when present.
    pub build_configuration_list: Option<ObjectId>,
}

impl Target {
    /// Returns `true` if this target's name marks it as a test target.
    ///
    /// # Examples
    ///
    /// ```
    /// use ps_pbxproj::{ObjectId, Target};
    /// use smallvec::SmallVec;
    ///
    /// let target = Target {
    ///     id: ObjectId::new("T1"),
    ///     name: "MyAppTests".to_owned(),
    ///     build_phases: SmallVec::new(),
    ///     build_configuration_list: None,
    /// };
    /// assert!(target.is_test_target());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_test_target(&self) -> bool {
        self.name.contains("Tests")
    }
}

/// A file element of the group tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Identifier of this file in the object table.
    pub id: ObjectId,

    /// Display name, when it differs from the path.
    pub name: Option<String>,

    /// Path segment relative to the enclosing group.
    ///
    /// A file without a path cannot be located on disk and is skipped by
    /// the pipeline.
    pub path: Option<String>,
}

/// A folder-like grouping node; may nest other groups and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Identifier of this group in the object table.
    pub id: ObjectId,

    /// Display name, when present.
    pub name: Option<String>,

    /// Path segment this group contributes to its children's paths.
    ///
    /// Groups used purely for organization carry no path and contribute
    /// nothing.
    pub path: Option<String>,

    /// Child references, files or nested groups.
    pub children: Vec<ObjectId>,
}

/// The part of a target's build graph listing bundled resource files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcesPhase {
    /// Identifier of this phase in the object table.
    pub id: ObjectId,

    /// Ordered build-file references; result order follows this order.
    pub files: Vec<ObjectId>,
}

/// The record linking a build phase entry to its underlying file element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    /// Identifier of this record in the object table.
    pub id: ObjectId,

    /// The referenced file element, when the link is intact.
    pub file_ref: Option<ObjectId>,
}

/// A named set of build settings, e.g. `Debug` or `Release`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    /// Identifier of this configuration in the object table.
    pub id: ObjectId,

    /// The configuration name.
    pub name: String,

    /// The configuration's build settings.
    pub settings: FxHashMap<String, Value>,
}

/// The list of configurations attached to a target or project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationList {
    /// Identifier of this list in the object table.
    pub id: ObjectId,

    /// References to the member configurations.
    pub configurations: Vec<ObjectId>,
}

/// Alias for the object-id-keyed lookup tables the graph is built from.
pub(crate) type ObjectMap<T> = FxHashMap<ObjectId, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_round_trip() {
        let id = ObjectId::new("ABCD1234");
        assert_eq!(id.as_str(), "ABCD1234");
        assert_eq!(id.to_string(), "ABCD1234");
        assert_eq!(ObjectId::from("ABCD1234"), id);
    }

    #[test]
    fn test_is_test_target() {
        let mut target = Target {
            id: ObjectId::new("T1"),
            name: "MyApp".to_owned(),
            build_phases: SmallVec::new(),
            build_configuration_list: None,
        };
        assert!(!target.is_test_target());

        target.name = "MyAppTests".to_owned();
        assert!(target.is_test_target());

        // Substring match anywhere in the name counts.
        target.name = "TestsHelper".to_owned();
        assert!(target.is_test_target());
    }
}
