use crate::fetch::RawPayload;
use std::collections::{BTreeMap, BTreeSet};

/// Year-indexed rows reshaped from one payload.
///
/// The column set is the union of field names seen across all years; a year
/// that never reported a field simply has no cell there. Rows iterate in
/// year order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: BTreeMap<String, BTreeMap<String, f64>>,
    columns: BTreeSet<String>,
}

/// Pure reshape; no aggregation, interpolation or unit conversion.
///
/// Callers hand in a validated payload; the sequencing in
/// [`crate::generator`] guarantees it, and nothing is re-checked here.
pub fn build(payload: RawPayload) -> Table {
    let rows = payload.0;
    let columns = rows
        .values()
        .flat_map(|fields| fields.keys().cloned())
        .collect();
    Table { rows, columns }
}

impl Table {
    /// Number of year rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in ascending year order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Column names, sorted.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.columns.contains(field)
    }

    /// Cell lookup; `None` when the year never reported the field.
    pub fn value(&self, year: &str, field: &str) -> Option<f64> {
        self.rows.get(year)?.get(field).copied()
    }

    /// Project one column in year order, keeping absent cells as `None`.
    pub fn series(&self, field: &str) -> Vec<(&str, Option<f64>)> {
        self.rows
            .iter()
            .map(|(year, fields)| (year.as_str(), fields.get(field).copied()))
            .collect()
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
