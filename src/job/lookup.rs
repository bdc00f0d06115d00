//! Dataset probe
//!
//! Resolves names against the dataset and reports what was found, without
//! dispatching any work.

use crate::dataset::Lookup;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    /// Found locations in dataset order
    pub entries: Vec<LookupEntry>,
    /// Requested names with no matching row
    pub missing: Vec<String>,
    /// Malformed rows passed over while scanning
    pub skipped_rows: usize,
}

impl LookupReport {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            entries: lookup
                .table
                .iter()
                .map(|l| LookupEntry {
                    name: l.name.clone(),
                    lat: l.coord.lat,
                    lon: l.coord.lon,
                })
                .collect(),
            missing: lookup.missing.clone(),
            skipped_rows: lookup.skipped_rows,
        }
    }
}
