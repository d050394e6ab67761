//! The aggregation pipeline.
//!
//! [`Scraper`] drives one run: for every build target it finds the
//! resource files matching the configured extension, resolves their
//! paths, decodes them, and folds every key into the comparison
//! [`Table`]. Targets process strictly one after another; a file that
//! fails to decode is logged and skipped, never fatal.

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8PathBuf;
use ps_core::ScrapeConfig;
use ps_pbxproj::{document_name, load_document, Target, XcodeProject};
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::report::CsvEmitter;
use crate::stats::ScrapeStats;
use crate::table::{Table, TargetList};

/// Everything one scrape run produced.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// The aggregated comparison table.
    pub table: Table,
    /// Column order for emission.
    pub targets: TargetList,
    /// Run counters.
    pub stats: ScrapeStats,
}

/// The single-pass aggregator over a loaded project.
///
/// # Examples
///
/// ```ignore
/// use ps_core::ScrapeConfig;
/// use ps_scraper::Scraper;
///
/// let config = ScrapeConfig {
///     project_path: "App.xcodeproj".into(),
///     default_target: Some("App".to_owned()),
///     ..ScrapeConfig::default()
/// };
///
/// let scraper = Scraper::from_config(config)?;
/// let outcome = scraper.scrape();
/// let written = scraper.export_csv(&outcome)?;
/// println!("wrote {} rows to {written}", outcome.table.row_count());
/// # Ok::<(), ps_scraper::ScrapeError>(())
/// ```
#[derive(Debug)]
pub struct Scraper {
    project: XcodeProject,
    config: ScrapeConfig,
}

impl Scraper {
    /// Creates a scraper over an already-loaded project.
    #[inline]
    #[must_use]
    pub fn new(project: XcodeProject, config: ScrapeConfig) -> Self {
        Self { project, config }
    }

    /// Validates the configuration and opens the project descriptor.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ScrapeError`] when the configuration is invalid
    /// or the descriptor cannot be loaded.
    pub fn from_config(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        config.validate()?;
        let project = XcodeProject::open(&config.project_path)?;
        Ok(Self::new(project, config))
    }

    /// Returns the run configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Runs the aggregation pass over all targets.
    ///
    /// Per-document failures degrade to a warning and a skip; nothing in
    /// this pass aborts the run, so the pass itself is infallible.
    #[must_use]
    pub fn scrape(&self) -> ScrapeOutcome {
        let mut table = Table::new();
        let mut targets = TargetList::new(self.config.default_target.clone());
        let mut stats = ScrapeStats::default();

        for target in self.project.targets() {
            if self.config.ignore_tests && target.is_test_target() {
                debug!(target = %target.name, "ignoring test target");
                continue;
            }

            info!(target = %target.name, "processing target");
            stats.record_target();
            targets.register(&target.name);

            for path in self.target_documents(target) {
                self.collect_document(&path, &target.name, &mut table, &mut stats);
            }
        }

        info!(
            targets = stats.targets,
            documents = stats.documents,
            skipped = stats.skipped,
            keys = stats.keys,
            "scrape complete"
        );

        ScrapeOutcome {
            table,
            targets,
            stats,
        }
    }

    /// Writes the outcome as CSV to the configured output path.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Output`] when the file cannot be created or
    /// written. The file handle closes on every path by scope.
    pub fn export_csv(&self, outcome: &ScrapeOutcome) -> Result<Utf8PathBuf, ScrapeError> {
        let path = &self.config.output_path;
        let file = File::create(path.as_std_path())
            .map_err(|source| ScrapeError::output(path.clone(), source))?;
        let mut writer = BufWriter::new(file);

        CsvEmitter::new(&outcome.table, &outcome.targets)
            .write_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|source| ScrapeError::output(path.clone(), source))?;

        info!(path = %path, rows = outcome.table.row_count(), "csv written");
        Ok(path.clone())
    }

    /// Returns the document paths one target contributes.
    ///
    /// Resource-phase matches come first, in phase order; files whose path
    /// cannot be resolved are silently excluded. When the phase yields no
    /// plist at all, the target's `INFOPLIST_FILE` setting for the
    /// configured build configuration serves as a fallback.
    fn target_documents(&self, target: &Target) -> Vec<Utf8PathBuf> {
        let extension = &self.config.resource_extension;
        let mut paths: Vec<Utf8PathBuf> = self
            .project
            .resources(target, extension)
            .iter()
            .filter_map(|file| self.project.resolve_path(file))
            .collect();

        if paths.is_empty() && extension == "plist" {
            if let Some(fallback) = self
                .project
                .info_plist_path(target, &self.config.configuration)
            {
                debug!(
                    target = %target.name,
                    path = %fallback,
                    configuration = %self.config.configuration,
                    "no bundled plist, using build-setting fallback"
                );
                paths.push(fallback);
            }
        }
        paths
    }

    /// Decodes one document and folds its keys into the table.
    fn collect_document(
        &self,
        path: &Utf8PathBuf,
        target_name: &str,
        table: &mut Table,
        stats: &mut ScrapeStats,
    ) {
        match load_document(path) {
            Ok(document) => {
                let section = document_name(path);
                stats.record_document(document.len());
                for (key, value) in document {
                    table.insert(section.clone(), key, target_name, value);
                }
            }
            Err(error) => {
                warn!(path = %path, %error, "skipping unreadable document");
                stats.record_skipped();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    /// A two-target project: `App` bundles `App/Info.plist`, `AppExtension`
    /// bundles `Ext/Info.plist`, and `AppTests` exists to be filtered out.
    const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>objects</key>
    <dict>
        <key>APP</key>
        <dict>
            <key>isa</key><string>PBXNativeTarget</string>
            <key>name</key><string>App</string>
            <key>buildPhases</key><array><string>RES1</string></array>
        </dict>
        <key>EXT</key>
        <dict>
            <key>isa</key><string>PBXNativeTarget</string>
            <key>name</key><string>AppExtension</string>
            <key>buildPhases</key><array><string>RES2</string></array>
        </dict>
        <key>TST</key>
        <dict>
            <key>isa</key><string>PBXNativeTarget</string>
            <key>name</key><string>AppTests</string>
            <key>buildPhases</key><array></array>
        </dict>
        <key>RES1</key>
        <dict>
            <key>isa</key><string>PBXResourcesBuildPhase</string>
            <key>files</key><array><string>BF1</string></array>
        </dict>
        <key>RES2</key>
        <dict>
            <key>isa</key><string>PBXResourcesBuildPhase</string>
            <key>files</key><array><string>BF2</string></array>
        </dict>
        <key>BF1</key>
        <dict>
            <key>isa</key><string>PBXBuildFile</string>
            <key>fileRef</key><string>F1</string>
        </dict>
        <key>BF2</key>
        <dict>
            <key>isa</key><string>PBXBuildFile</string>
            <key>fileRef</key><string>F2</string>
        </dict>
        <key>F1</key>
        <dict>
            <key>isa</key><string>PBXFileReference</string>
            <key>path</key><string>Info.plist</string>
        </dict>
        <key>F2</key>
        <dict>
            <key>isa</key><string>PBXFileReference</string>
            <key>path</key><string>Info.plist</string>
        </dict>
        <key>GRP1</key>
        <dict>
            <key>isa</key><string>PBXGroup</string>
            <key>path</key><string>App</string>
            <key>children</key><array><string>F1</string></array>
        </dict>
        <key>GRP2</key>
        <dict>
            <key>isa</key><string>PBXGroup</string>
            <key>path</key><string>Ext</string>
            <key>children</key><array><string>F2</string></array>
        </dict>
    </dict>
</dict>
</plist>"#;

    fn info_plist(version: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>CFBundleVersion</key>
    <string>{version}</string>
</dict>
</plist>"#
        )
    }

    fn write_fixture_tree(root: &Path) {
        let bundle = root.join("App.xcodeproj");
        fs::create_dir(&bundle).expect("create bundle");
        fs::write(bundle.join("project.pbxproj"), DESCRIPTOR).expect("write descriptor");

        fs::create_dir(root.join("App")).expect("create App dir");
        fs::write(root.join("App/Info.plist"), info_plist("1.0")).expect("write App plist");

        fs::create_dir(root.join("Ext")).expect("create Ext dir");
        fs::write(root.join("Ext/Info.plist"), info_plist("2.0")).expect("write Ext plist");
    }

    fn scraper_for(dir: &TempDir, default_target: Option<&str>) -> Scraper {
        write_fixture_tree(dir.path());
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        let config = ScrapeConfig {
            project_path: root.join("App.xcodeproj"),
            default_target: default_target.map(str::to_owned),
            output_path: root.join("output.csv"),
            ..ScrapeConfig::default()
        };
        Scraper::from_config(config).expect("open scraper")
    }

    #[test]
    fn test_scrape_collects_all_targets() {
        let dir = TempDir::new().expect("temp dir");
        let scraper = scraper_for(&dir, Some("App"));
        let outcome = scraper.scrape();

        assert_eq!(outcome.targets.names(), ["App", "AppExtension"]);
        assert_eq!(outcome.stats.targets, 2);
        assert_eq!(outcome.stats.documents, 2);
        assert_eq!(outcome.table.row_count(), 1);
        assert_eq!(
            outcome
                .table
                .value("Info", "CFBundleVersion", "App")
                .map(ps_core::Value::render),
            Some("1.0".to_owned())
        );
        assert_eq!(
            outcome
                .table
                .value("Info", "CFBundleVersion", "AppExtension")
                .map(ps_core::Value::render),
            Some("2.0".to_owned())
        );
    }

    #[test]
    fn test_test_targets_are_excluded() {
        let dir = TempDir::new().expect("temp dir");
        let scraper = scraper_for(&dir, None);
        let outcome = scraper.scrape();

        assert!(!outcome.targets.names().iter().any(|n| n == "AppTests"));
    }

    #[test]
    fn test_include_tests_keeps_test_targets() {
        let dir = TempDir::new().expect("temp dir");
        write_fixture_tree(dir.path());
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        let config = ScrapeConfig {
            project_path: root.join("App.xcodeproj"),
            ignore_tests: false,
            ..ScrapeConfig::default()
        };
        let scraper = Scraper::from_config(config).expect("open scraper");
        let outcome = scraper.scrape();

        assert!(outcome.targets.names().iter().any(|n| n == "AppTests"));
    }

    #[test]
    fn test_export_writes_round_trip_csv() {
        let dir = TempDir::new().expect("temp dir");
        let scraper = scraper_for(&dir, Some("App"));
        let outcome = scraper.scrape();
        let written = scraper.export_csv(&outcome).expect("export csv");

        let csv = fs::read_to_string(written.as_std_path()).expect("read csv");
        assert_eq!(
            csv,
            "section,key,type,App (default),AppExtension\n\
             Info,CFBundleVersion,string,\"1.0\",\"2.0\"\n"
        );
    }

    #[test]
    fn test_unreadable_document_skips_only_that_file() {
        let dir = TempDir::new().expect("temp dir");
        let scraper = scraper_for(&dir, Some("App"));

        // Corrupt one of the two plists after the descriptor loaded.
        fs::write(dir.path().join("Ext/Info.plist"), "not a plist").expect("corrupt plist");

        let outcome = scraper.scrape();
        assert_eq!(outcome.stats.skipped, 1);
        assert_eq!(outcome.stats.documents, 1);
        // The healthy file still contributes its row.
        assert!(outcome.table.value("Info", "CFBundleVersion", "App").is_some());
        assert!(outcome
            .table
            .value("Info", "CFBundleVersion", "AppExtension")
            .is_none());
    }

    #[test]
    fn test_empty_document_contributes_no_rows() {
        let dir = TempDir::new().expect("temp dir");
        let scraper = scraper_for(&dir, None);

        fs::write(
            dir.path().join("App/Info.plist"),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict/>
</plist>"#,
        )
        .expect("empty plist");
        fs::write(
            dir.path().join("Ext/Info.plist"),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict/>
</plist>"#,
        )
        .expect("empty plist");

        let outcome = scraper.scrape();
        assert_eq!(outcome.stats.documents, 2);
        assert!(outcome.table.is_empty());
    }

    #[test]
    fn test_info_plist_setting_fallback() {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();

        let descriptor = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>objects</key>
    <dict>
        <key>APP</key>
        <dict>
            <key>isa</key><string>PBXNativeTarget</string>
            <key>name</key><string>App</string>
            <key>buildConfigurationList</key><string>CL</string>
        </dict>
        <key>CL</key>
        <dict>
            <key>isa</key><string>XCConfigurationList</string>
            <key>buildConfigurations</key><array><string>CFG</string></array>
        </dict>
        <key>CFG</key>
        <dict>
            <key>isa</key><string>XCBuildConfiguration</string>
            <key>name</key><string>Debug</string>
            <key>buildSettings</key>
            <dict>
                <key>INFOPLIST_FILE</key><string>App/$(TARGET_NAME)-Info.plist</string>
            </dict>
        </dict>
    </dict>
</dict>
</plist>"#;

        let bundle = root.join("App.xcodeproj");
        fs::create_dir(&bundle).expect("create bundle");
        fs::write(bundle.join("project.pbxproj"), descriptor).expect("write descriptor");
        fs::create_dir(root.join("App")).expect("create App dir");
        fs::write(root.join("App/App-Info.plist"), info_plist("3.0")).expect("write plist");

        let root = Utf8PathBuf::from_path_buf(root.to_path_buf()).expect("utf-8 temp path");
        let config = ScrapeConfig {
            project_path: root.join("App.xcodeproj"),
            ..ScrapeConfig::default()
        };
        let scraper = Scraper::from_config(config).expect("open scraper");
        let outcome = scraper.scrape();

        assert_eq!(
            outcome
                .table
                .value("App-Info", "CFBundleVersion", "App")
                .map(ps_core::Value::render),
            Some("3.0".to_owned())
        );
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = ScrapeConfig::default();
        let err = Scraper::from_config(config).expect_err("empty project path");
        assert!(matches!(err, ScrapeError::Config(_)));
    }
}
