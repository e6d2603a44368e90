//! Access-log records and their wire encoding.
//!
//! An [`AccessRecord`] is an ordered set of values whose column names are
//! fixed by its [`LogPattern`]. The builder extracts and normalises fields
//! from a completed request; the serialiser turns a record into the series
//! payload accepted by the store.

mod builder;
mod schema;
mod serialise;

#[cfg(test)]
mod tests;

pub use builder::{AccessFields, HostLookup, build_record};
pub use schema::{COMBINED_COLUMNS, COMMON_COLUMNS, LogPattern};
pub use serialise::serialise_series;

use serde::Serialize;

/// A single column value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One access-log entry laid out for a particular pattern.
///
/// Values are stored in column order; the column names come from the
/// pattern so a record can never disagree with its layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    pattern: LogPattern,
    values: Vec<FieldValue>,
}

impl AccessRecord {
    pub(crate) fn new(pattern: LogPattern, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(values.len(), pattern.columns().len());
        Self { pattern, values }
    }

    pub fn pattern(&self) -> LogPattern {
        self.pattern
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.pattern.columns()
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.columns().iter().copied().zip(self.values.iter())
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}
