//! CSV serialization of the comparison table.
//!
//! One header row (`section, key, type`, then one column per target, the
//! default column suffixed with ` (default)`), one data row per
//! (section, key) pair in the table's deterministic order.
//!
//! Quoting is per field class: the section/key/type cells are escaped only
//! when they contain a delimiter, quote, or newline; value cells are always
//! quoted, which keeps multi-line JSON aggregates inside a single field.

use std::io::{self, Write};

use crate::diff;
use crate::table::{Table, TargetList};

/// Serializes a [`Table`] to CSV.
///
/// # Examples
///
/// ```
/// use ps_core::Value;
/// use ps_scraper::{CsvEmitter, Table, TargetList};
///
/// let mut table = Table::new();
/// table.insert("Info", "CFBundleVersion", "App", Value::from("1.0"));
///
/// let mut targets = TargetList::new(None);
/// targets.register("App");
///
/// let csv = CsvEmitter::new(&table, &targets).to_csv_string();
/// assert_eq!(csv, "section,key,type,App\nInfo,CFBundleVersion,string,\"1.0\"\n");
/// ```
#[derive(Debug)]
pub struct CsvEmitter<'a> {
    table: &'a Table,
    targets: &'a TargetList,
}

impl<'a> CsvEmitter<'a> {
    /// Creates an emitter over a finished table and its column order.
    #[inline]
    #[must_use]
    pub fn new(table: &'a Table, targets: &'a TargetList) -> Self {
        Self { table, targets }
    }

    /// Writes the full CSV to `out`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the caller maps it to its own
    /// output-error type.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_header(out)?;
        for (section, key, values) in self.table.rows() {
            let default_value = self
                .targets
                .default_target()
                .and_then(|name| values.get(name));

            let type_label = diff::row_type(
                self.targets
                    .names()
                    .iter()
                    .map(|name| values.get(name.as_str())),
            )
            .map_or("", |kind| kind.label());

            write!(
                out,
                "{},{},{}",
                escape_field(section),
                escape_field(key),
                escape_field(type_label)
            )?;
            for name in self.targets.names() {
                let emitted = diff::cell(
                    default_value,
                    values.get(name.as_str()),
                    self.targets.is_default(name),
                );
                match emitted {
                    Some(text) => write!(out, ",{}", quote_field(&text))?,
                    None => write!(out, ",")?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Renders the full CSV into a string.
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "section,key,type")?;
        for name in self.targets.names() {
            if self.targets.is_default(name) {
                write!(out, ",{}", escape_field(&format!("{name} (default)")))?;
            } else {
                write!(out, ",{}", escape_field(name))?;
            }
        }
        writeln!(out)
    }
}

/// Escapes a field for CSV output, quoting only when needed.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        quote_field(field)
    } else {
        field.to_owned()
    }
}

/// Wraps a field in quotes unconditionally, doubling embedded quotes.
fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
