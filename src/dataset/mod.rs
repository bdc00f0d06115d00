//! City coordinate dataset
//!
//! Reads a GeoNames `cities1000`-style table: one city per line, 19
//! tab-separated fields, with the name in column 1 and latitude/longitude in
//! columns 4 and 5. Only the requested names are kept.
//!
//! # Data Rules
//!
//! - Names are matched case-insensitively
//! - A row whose field count is not 19, or whose coordinates do not parse, is
//!   skipped without error
//! - When a name occurs more than once, the first row wins
//! - Table order is dataset order, which is also the tie-break order used by
//!   the meeting-point job
//!
//! A small sample table is compiled into the binary and used when no dataset
//! path is configured.

use crate::metric::Coordinate;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of fields in a well-formed row
pub const FIELD_COUNT: usize = 19;

const NAME_FIELD: usize = 1;
const LAT_FIELD: usize = 4;
const LON_FIELD: usize = 5;

/// Sample table bundled with the binary
pub const BUNDLED_CITIES: &str = include_str!("../../data/cities-sample.tsv");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open dataset {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading dataset at line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Where city rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// The sample table compiled into the binary
    Bundled,
    /// A tab-separated file on disk
    File(PathBuf),
}

/// One resolved city
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Lower-cased lookup key
    pub key: String,
    /// Name as spelled in the dataset
    pub name: String,
    pub coord: Coordinate,
}

/// Resolved cities in dataset order
///
/// Read-only once built; shared across executors behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    locations: Vec<Location>,
}

impl CoordinateTable {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Location at a given position in dataset order
    pub fn get(&self, ordinal: usize) -> Option<&Location> {
        self.locations.get(ordinal)
    }

    /// Case-insensitive lookup by name
    pub fn find(&self, name: &str) -> Option<&Location> {
        let key = name.to_lowercase();
        self.locations.iter().find(|l| l.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }
}

/// Outcome of scanning a dataset for a set of names
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    pub table: CoordinateTable,
    /// Requested names (lower-cased) with no matching row
    pub missing: Vec<String>,
    /// Malformed rows passed over during the scan
    pub skipped_rows: usize,
}

/// Scan a dataset source for `wanted` names
pub fn load(source: &DatasetSource, wanted: &[String]) -> Result<Lookup, DatasetError> {
    match source {
        DatasetSource::Bundled => lookup(BUNDLED_CITIES.as_bytes(), wanted),
        DatasetSource::File(path) => load_file(path, wanted),
    }
}

fn load_file(path: &Path, wanted: &[String]) -> Result<Lookup, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("scanning dataset {}", path.display());
    lookup(BufReader::new(file), wanted)
}

/// Scan rows from `reader`, keeping the first row for each wanted name
///
/// Missing names are reported in the order they were requested.
pub fn lookup<R: BufRead>(reader: R, wanted: &[String]) -> Result<Lookup, DatasetError> {
    let mut pending: Vec<String> = Vec::new();
    for name in wanted {
        let key = name.to_lowercase();
        if !pending.contains(&key) {
            pending.push(key);
        }
    }
    let wanted_keys: HashSet<&str> = pending.iter().map(String::as_str).collect();

    let mut found: Vec<Location> = Vec::new();
    let mut skipped_rows = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DatasetError::Read { line: idx + 1, source })?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let Some((name, coord)) = parse_row(line) else {
            skipped_rows += 1;
            continue;
        };

        let key = name.to_lowercase();
        if wanted_keys.contains(key.as_str()) && !found.iter().any(|l| l.key == key) {
            found.push(Location {
                key,
                name: name.to_string(),
                coord,
            });
            if found.len() == wanted_keys.len() {
                break;
            }
        }
    }

    if skipped_rows > 0 {
        log::debug!("skipped {} malformed dataset row(s)", skipped_rows);
    }

    let missing = pending
        .iter()
        .filter(|key| !found.iter().any(|l| &l.key == *key))
        .cloned()
        .collect();

    Ok(Lookup {
        table: CoordinateTable::new(found),
        missing,
        skipped_rows,
    })
}

/// Extract `(name, coordinate)` from one row, or `None` if it is malformed
fn parse_row(line: &str) -> Option<(&str, Coordinate)> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let lat = fields[LAT_FIELD].trim().parse::<f64>().ok()?;
    let lon = fields[LON_FIELD].trim().parse::<f64>().ok()?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    Some((fields[NAME_FIELD], Coordinate::new(lat, lon)))
}
