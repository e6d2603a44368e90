//! JSON series serialisation.
//!
//! The store accepts a JSON array of series objects, each carrying a name,
//! its column list, and one row of values per point. A record always travels
//! as a single-point series so it is written whole or not at all.

use serde::Serialize;

use super::{AccessRecord, FieldValue};

#[derive(Serialize)]
struct SerializableSeries<'a> {
    name: &'a str,
    columns: &'a [&'a str],
    points: [&'a [FieldValue]; 1],
}

/// Serialise `record` as a one-point series named `series_name`.
pub fn serialise_series(series_name: &str, record: &AccessRecord) -> serde_json::Result<Vec<u8>> {
    let series = [SerializableSeries {
        name: series_name,
        columns: record.columns(),
        points: [record.values()],
    }];
    serde_json::to_vec(&series)
}
