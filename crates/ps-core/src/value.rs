//! Dynamically-typed property-list values.
//!
//! Property lists carry untyped content, so this module provides [`Value`],
//! an explicit tagged union with one constructor per value category, and
//! [`ValueKind`], the coarse category used for the CSV type column.
//!
//! # Examples
//!
//! ```
//! use ps_core::{Value, ValueKind};
//!
//! let version = Value::String("1.0".to_owned());
//! assert_eq!(version.kind(), ValueKind::String);
//! assert_eq!(version.render(), "1.0");
//!
//! // Integral numbers render without a fraction, so numeric 1 and
//! // string "1" render identically.
//! assert_eq!(Value::Number(1.0).render(), "1");
//! ```

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

/// Largest integer magnitude an `f64` can represent exactly (2^53).
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// The coarse category of a [`Value`].
///
/// One label per constructor; used for the `type` column of the exported
/// comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text content.
    String,
    /// Integer or floating-point content.
    Number,
    /// Boolean content.
    Bool,
    /// An ordered list of values.
    Array,
    /// A string-keyed mapping of values.
    Dictionary,
}

impl ValueKind {
    /// Returns the label written to the CSV type column.
    ///
    /// # Examples
    ///
    /// ```
    /// use ps_core::ValueKind;
    ///
    /// assert_eq!(ValueKind::Dictionary.label(), "dictionary");
    /// ```
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
        }
    }
}

/// A decoded property-list value.
///
/// The union mirrors what a key-value document can hold: scalars (string,
/// number, bool) and aggregates (array, dictionary). Numbers are carried as
/// `f64`; integral values render without a fraction.
///
/// Structural equality (`PartialEq`) compares aggregates deeply, which is
/// what the table differ relies on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text content.
    String(String),
    /// Integer or floating-point content.
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// A string-keyed mapping of values, iterated in key order.
    Dict(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the coarse category of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Bool,
            Self::Array(_) => ValueKind::Array,
            Self::Dict(_) => ValueKind::Dictionary,
        }
    }

    /// Returns `true` for string, number, and bool values.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_) | Self::Bool(_))
    }

    /// Renders this value as the text written into a CSV cell.
    ///
    /// Scalars render as their canonical text: strings verbatim, booleans as
    /// `true`/`false`, and numbers without a fraction when integral (so
    /// numeric `1` renders identically to string `"1"`). Aggregates render
    /// as pretty-printed JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use ps_core::Value;
    ///
    /// assert_eq!(Value::Bool(true).render(), "true");
    /// assert_eq!(Value::Number(2.5).render(), "2.5");
    /// assert_eq!(
    ///     Value::Array(vec![Value::Number(1.0)]).render(),
    ///     "[\n  1\n]"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => render_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Array(_) | Self::Dict(_) => {
                // Serialization of this union cannot fail: keys are strings
                // and there is no non-serializable variant.
                serde_json::to_string_pretty(self).unwrap_or_default()
            }
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[inline]
    #[allow(clippy::cast_precision_loss)] // Plist integers fit well below 2^53
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) => {
                if is_exact_integer(*n) {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::Array(items) => items.serialize(serializer),
            Self::Dict(map) => map.serialize(serializer),
        }
    }
}

/// Whether `n` is an integer an `i64` can hold exactly.
fn is_exact_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INT
}

#[allow(clippy::cast_possible_truncation)]
fn render_number(n: f64) -> String {
    if is_exact_integer(n) {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}
