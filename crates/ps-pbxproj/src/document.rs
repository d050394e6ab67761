//! Loading and conversion of key-value resource documents.
//!
//! A matched resource file is decoded with the `plist` crate and converted
//! into the workspace's [`Value`] union. The decoder detects XML, binary,
//! and OpenStep text formats on its own, so the pipeline never inspects the
//! serialization.

use std::collections::BTreeMap;

use camino::Utf8Path;
use ps_core::Value;
use tracing::debug;

use crate::error::ProjectError;

/// The decoded top-level content of one resource document.
///
/// Keys iterate in lexical order, which is what gives the exported table
/// its deterministic row order.
pub type Document = BTreeMap<String, Value>;

/// Loads a resource document from disk.
///
/// # Errors
///
/// Returns a recoverable [`ProjectError::Document`] when the file cannot be
/// read or decoded, and [`ProjectError::DocumentShape`] when the decoded
/// root is not a dictionary. Callers skip the file in both cases.
pub fn load_document(path: &Utf8Path) -> Result<Document, ProjectError> {
    let root = plist::Value::from_file(path.as_std_path()).map_err(|source| {
        ProjectError::Document {
            path: path.to_owned(),
            source,
        }
    })?;

    let dict = root
        .as_dictionary()
        .ok_or_else(|| ProjectError::DocumentShape {
            path: path.to_owned(),
        })?;

    let mut document = Document::new();
    for (key, raw) in dict.iter() {
        match convert(raw) {
            Some(value) => {
                document.insert(key.into(), value);
            }
            None => debug!(path = %path, key = %key, "skipping entry with unrepresentable value"),
        }
    }
    Ok(document)
}

/// Derives the document name from a file path: base name minus the final
/// extension.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ps_pbxproj::document_name;
///
/// assert_eq!(document_name(Utf8Path::new("App/Info.plist")), "Info");
/// assert_eq!(document_name(Utf8Path::new("Settings.plist")), "Settings");
/// ```
#[must_use]
pub fn document_name(path: &Utf8Path) -> String {
    path.file_stem().unwrap_or(path.as_str()).to_owned()
}

/// Converts a decoded plist value into the workspace value union.
///
/// Dates are carried as their XML datetime string. Binary data has no
/// category in the union and yields `None`; aggregate members that cannot
/// be represented are dropped the same way.
#[allow(clippy::cast_precision_loss)] // Bundle metadata never nears 2^53
pub(crate) fn convert(value: &plist::Value) -> Option<Value> {
    match value {
        plist::Value::String(s) => Some(Value::String(s.clone())),
        plist::Value::Boolean(b) => Some(Value::Bool(*b)),
        plist::Value::Integer(n) => {
            let as_float = n
                .as_signed()
                .map(|v| v as f64)
                .or_else(|| n.as_unsigned().map(|v| v as f64))?;
            Some(Value::Number(as_float))
        }
        plist::Value::Real(r) => Some(Value::Number(*r)),
        plist::Value::Date(d) => Some(Value::String(d.to_xml_format())),
        plist::Value::Array(items) => {
            Some(Value::Array(items.iter().filter_map(convert).collect()))
        }
        plist::Value::Dictionary(dict) => {
            let mut map = BTreeMap::new();
            for (key, raw) in dict.iter() {
                if let Some(converted) = convert(raw) {
                    map.insert(key.into(), converted);
                }
            }
            Some(Value::Dict(map))
        }
        _ => None,
    }
}
