//! Descriptor loading and graph traversal.
//!
//! [`XcodeProject`] decodes a project descriptor into the typed object
//! graph and answers the three questions the pipeline asks of it:
//!
//! - where does a file element live on disk (path resolution through the
//!   group tree),
//! - which resource files of a given extension does a target bundle,
//! - what does a named build configuration say for a target.
//!
//! # Design
//!
//! The descriptor stores the group tree top-down (groups list their
//! children), while path resolution walks bottom-up. Instead of scanning
//! every group per step, a `child-id -> parent-group-id` index is built
//! once at load time; each resolution is then O(depth). Ambiguous
//! parentage and membership cycles are rejected at load time, so the walk
//! itself cannot diverge.
//!
//! # Examples
//!
//! ```ignore
//! use camino::Utf8Path;
//! use ps_pbxproj::XcodeProject;
//!
//! let project = XcodeProject::open(Utf8Path::new("App.xcodeproj"))?;
//! for target in project.targets() {
//!     println!("target {}", target.name);
//! }
//! # Ok::<(), ps_pbxproj::ProjectError>(())
//! ```

use std::io::{Read, Seek};

use camino::{Utf8Path, Utf8PathBuf};
use ps_core::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::document;
use crate::error::ProjectError;
use crate::graph::{
    BuildConfiguration, BuildFile, ConfigurationList, FileReference, Group, ObjectId, ObjectMap,
    ResourcesPhase, Target,
};

/// File name of the descriptor inside a project bundle directory.
const DESCRIPTOR_FILE: &str = "project.pbxproj";

/// Extension of a project bundle directory.
const BUNDLE_EXTENSION: &str = "xcodeproj";

/// The build setting naming a target's info property list.
const INFO_PLIST_SETTING: &str = "INFOPLIST_FILE";

/// Setting value marking an inherited (and therefore unusable) entry.
const INHERITED_SETTING: &str = "$(inherited)";

/// A loaded project descriptor: the typed object graph plus the indexes
/// the pipeline traverses it with.
///
/// Immutable once constructed; every accessor borrows.
#[derive(Debug)]
pub struct XcodeProject {
    /// Directory all resolved file paths are relative to (the parent of
    /// the project bundle).
    base_dir: Utf8PathBuf,
    /// Build targets in descriptor order.
    targets: Vec<Target>,
    /// All groups, keyed by id.
    groups: ObjectMap<Group>,
    /// All file references, keyed by id.
    file_refs: ObjectMap<FileReference>,
    /// All build-file records, keyed by id.
    build_files: ObjectMap<BuildFile>,
    /// All resources build phases, keyed by id.
    resource_phases: ObjectMap<ResourcesPhase>,
    /// All configuration lists, keyed by id.
    configuration_lists: ObjectMap<ConfigurationList>,
    /// All build configurations, keyed by id.
    configurations: ObjectMap<BuildConfiguration>,
    /// Reverse index: child id to owning group id.
    parent_of: FxHashMap<ObjectId, ObjectId>,
}

impl XcodeProject {
    /// Opens a descriptor from disk.
    ///
    /// Accepts either the project bundle directory (`App.xcodeproj`) or the
    /// descriptor file inside it; resolved paths are relative to the
    /// bundle's parent directory either way.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ProjectError`] when the descriptor cannot be read
    /// or decoded, or when the decoded graph is structurally unusable.
    pub fn open(path: &Utf8Path) -> Result<Self, ProjectError> {
        let (descriptor, base_dir) = locate_descriptor(path);
        let root = plist::Value::from_file(descriptor.as_std_path()).map_err(|source| {
            ProjectError::Descriptor {
                path: descriptor.clone(),
                source,
            }
        })?;
        Self::from_root(root, base_dir)
    }

    /// Decodes a descriptor from an in-memory reader.
    ///
    /// `base_dir` takes the place of the bundle's parent directory for
    /// path resolution.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`XcodeProject::open`].
    pub fn from_reader<R: Read + Seek>(
        reader: R,
        base_dir: &Utf8Path,
    ) -> Result<Self, ProjectError> {
        let root = plist::Value::from_reader(reader).map_err(|source| ProjectError::Descriptor {
            path: base_dir.join(DESCRIPTOR_FILE),
            source,
        })?;
        Self::from_root(root, base_dir.to_owned())
    }

    /// Builds the typed graph from a decoded descriptor document.
    fn from_root(root: plist::Value, base_dir: Utf8PathBuf) -> Result<Self, ProjectError> {
        let top = root
            .as_dictionary()
            .ok_or_else(|| ProjectError::Malformed("descriptor root is not a dictionary".into()))?;
        let objects = top
            .get("objects")
            .and_then(plist::Value::as_dictionary)
            .ok_or_else(|| ProjectError::Malformed("descriptor has no objects table".into()))?;

        let mut targets = Vec::new();
        let mut groups: ObjectMap<Group> = ObjectMap::default();
        let mut file_refs: ObjectMap<FileReference> = ObjectMap::default();
        let mut build_files: ObjectMap<BuildFile> = ObjectMap::default();
        let mut resource_phases: ObjectMap<ResourcesPhase> = ObjectMap::default();
        let mut configuration_lists: ObjectMap<ConfigurationList> = ObjectMap::default();
        let mut configurations: ObjectMap<BuildConfiguration> = ObjectMap::default();

        for (key, raw) in objects.iter() {
            let id = ObjectId::new(key);
            let Some(entry) = raw.as_dictionary() else {
                continue;
            };
            let Some(isa) = entry.get("isa").and_then(plist::Value::as_string) else {
                continue;
            };

            match isa {
                "PBXNativeTarget" => {
                    let Some(name) = string_field(entry, "name") else {
                        debug!(id = %id, "skipping unnamed target");
                        continue;
                    };
                    targets.push(Target {
                        id,
                        name,
                        build_phases: ref_array(entry, "buildPhases").into_iter().collect(),
                        build_configuration_list: ref_field(entry, "buildConfigurationList"),
                    });
                }
                "PBXGroup" => {
                    groups.insert(
                        id.clone(),
                        Group {
                            id,
                            name: string_field(entry, "name"),
                            path: string_field(entry, "path"),
                            children: ref_array(entry, "children"),
                        },
                    );
                }
                "PBXFileReference" => {
                    file_refs.insert(
                        id.clone(),
                        FileReference {
                            id,
                            name: string_field(entry, "name"),
                            path: string_field(entry, "path"),
                        },
                    );
                }
                "PBXBuildFile" => {
                    build_files.insert(
                        id.clone(),
                        BuildFile {
                            id,
                            file_ref: ref_field(entry, "fileRef"),
                        },
                    );
                }
                "PBXResourcesBuildPhase" => {
                    resource_phases.insert(
                        id.clone(),
                        ResourcesPhase {
                            id,
                            files: ref_array(entry, "files"),
                        },
                    );
                }
                "XCConfigurationList" => {
                    configuration_lists.insert(
                        id.clone(),
                        ConfigurationList {
                            id,
                            configurations: ref_array(entry, "buildConfigurations"),
                        },
                    );
                }
                "XCBuildConfiguration" => {
                    let Some(name) = string_field(entry, "name") else {
                        debug!(id = %id, "skipping unnamed build configuration");
                        continue;
                    };
                    let mut settings = FxHashMap::default();
                    if let Some(raw_settings) =
                        entry.get("buildSettings").and_then(plist::Value::as_dictionary)
                    {
                        for (setting, value) in raw_settings.iter() {
                            if let Some(converted) = document::convert(value) {
                                settings.insert(setting.into(), converted);
                            }
                        }
                    }
                    configurations.insert(id.clone(), BuildConfiguration { id, name, settings });
                }
                _ => {}
            }
        }

        let parent_of = build_parent_index(&groups)?;
        verify_acyclic(&parent_of)?;

        Ok(Self {
            base_dir,
            targets,
            groups,
            file_refs,
            build_files,
            resource_phases,
            configuration_lists,
            configurations,
            parent_of,
        })
    }

    /// Returns the build targets in descriptor order.
    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Returns the directory resolved paths are relative to.
    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Resolves a file element to its on-disk path.
    ///
    /// Walks from the file up through the group tree, prepending each
    /// enclosing group's path segment (groups without one contribute
    /// nothing), and finally the base directory. A file without a path
    /// segment resolves to `None`; an orphan file (no enclosing group)
    /// resolves best-effort directly under the base directory.
    #[must_use]
    pub fn resolve_path(&self, file: &FileReference) -> Option<Utf8PathBuf> {
        let own = file.path.as_deref()?;

        let mut segments: Vec<&str> = vec![own];
        let mut current = &file.id;
        while let Some(parent) = self.parent_of.get(current) {
            if let Some(group) = self.groups.get(parent) {
                match group.path.as_deref() {
                    Some(path) if !path.is_empty() => segments.push(path),
                    _ => {}
                }
            }
            current = parent;
        }

        let mut full = self.base_dir.clone();
        for segment in segments.iter().rev() {
            full.push(segment);
        }
        Some(full)
    }

    /// Returns the target's resource files matching the given extension.
    ///
    /// Locates the resources build phase referenced by the target (no
    /// phase means no results) and keeps phase order. Broken build-file or
    /// file-reference links are skipped silently, as are files without a
    /// path. The extension match is case sensitive and applies to the
    /// final extension only: `Settings.plist` matches `plist`,
    /// `Settings.plist.bak` does not.
    #[must_use]
    pub fn resources(&self, target: &Target, extension: &str) -> SmallVec<[&FileReference; 4]> {
        let Some(phase) = target
            .build_phases
            .iter()
            .find_map(|id| self.resource_phases.get(id))
        else {
            return SmallVec::new();
        };

        let mut files = SmallVec::new();
        for build_file_id in &phase.files {
            let Some(build_file) = self.build_files.get(build_file_id) else {
                continue;
            };
            let Some(file_id) = &build_file.file_ref else {
                continue;
            };
            let Some(file) = self.file_refs.get(file_id) else {
                continue;
            };
            let Some(path) = file.path.as_deref() else {
                continue;
            };
            if Utf8Path::new(path).extension() == Some(extension) {
                files.push(file);
            }
        }
        files
    }

    /// Resolves a named build configuration through a configuration list.
    #[must_use]
    pub fn build_configuration(
        &self,
        list: &ObjectId,
        name: &str,
    ) -> Option<&BuildConfiguration> {
        let list = self.configuration_lists.get(list)?;
        list.configurations
            .iter()
            .filter_map(|id| self.configurations.get(id))
            .find(|configuration| configuration.name == name)
    }

    /// Returns the target's info property list path from its build
    /// settings, for the named configuration.
    ///
    /// Reads the `INFOPLIST_FILE` setting, substitutes `$(TARGET_NAME)`,
    /// and rejects empty or inherited values. The result is joined to the
    /// base directory.
    #[must_use]
    pub fn info_plist_path(&self, target: &Target, configuration: &str) -> Option<Utf8PathBuf> {
        let list = target.build_configuration_list.as_ref()?;
        let configuration = self.build_configuration(list, configuration)?;
        let setting = configuration.settings.get(INFO_PLIST_SETTING)?;
        let ps_core::Value::String(raw) = setting else {
            return None;
        };

        let substituted = raw.replace("$(TARGET_NAME)", &target.name);
        if substituted.is_empty() || substituted == INHERITED_SETTING {
            return None;
        }
        Some(self.base_dir.join(substituted))
    }
}

/// Splits the CLI-supplied path into descriptor file and resolution base.
fn locate_descriptor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let parent_or_empty =
        |p: &Utf8Path| p.parent().map_or_else(Utf8PathBuf::new, Utf8Path::to_path_buf);

    if path.is_dir() {
        (path.join(DESCRIPTOR_FILE), parent_or_empty(path))
    } else {
        let base = match path.parent() {
            Some(bundle) if bundle.extension() == Some(BUNDLE_EXTENSION) => {
                parent_or_empty(bundle)
            }
            Some(dir) => dir.to_path_buf(),
            None => Utf8PathBuf::new(),
        };
        (path.to_path_buf(), base)
    }
}

/// Builds the child-to-parent index, rejecting ambiguous parentage.
fn build_parent_index(
    groups: &ObjectMap<Group>,
) -> Result<FxHashMap<ObjectId, ObjectId>, ProjectError> {
    let mut parent_of: FxHashMap<ObjectId, ObjectId> =
        ps_core::fx_hash_map_with_capacity(groups.len() * 2);

    for (group_id, group) in groups {
        for child in &group.children {
            if let Some(previous) = parent_of.insert(child.clone(), group_id.clone()) {
                if previous != *group_id {
                    return Err(ProjectError::AmbiguousGroup {
                        child: child.clone(),
                        first: previous,
                        second: group_id.clone(),
                    });
                }
            }
        }
    }
    Ok(parent_of)
}

/// Rejects group-membership cycles so path resolution always terminates.
fn verify_acyclic(parent_of: &FxHashMap<ObjectId, ObjectId>) -> Result<(), ProjectError> {
    let mut verified: FxHashSet<&ObjectId> = FxHashSet::default();

    for start in parent_of.keys() {
        let mut seen: FxHashSet<&ObjectId> = FxHashSet::default();
        let mut current = start;
        while let Some(parent) = parent_of.get(current) {
            if verified.contains(parent) {
                break;
            }
            if !seen.insert(parent) {
                return Err(ProjectError::GroupCycle {
                    reference: parent.clone(),
                });
            }
            current = parent;
        }
        verified.extend(seen);
    }
    Ok(())
}

fn string_field(entry: &plist::Dictionary, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(plist::Value::as_string)
        .map(str::to_owned)
}

fn ref_field(entry: &plist::Dictionary, key: &str) -> Option<ObjectId> {
    string_field(entry, key).map(ObjectId::from)
}

fn ref_array(entry: &plist::Dictionary, key: &str) -> Vec<ObjectId> {
    entry
        .get(key)
        .and_then(plist::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(plist::Value::as_string)
                .map(ObjectId::from)
                .collect()
        })
        .unwrap_or_default()
}
