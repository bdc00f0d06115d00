//! Optimal meeting point
//!
//! Every resolved location is a candidate. A worker computes, for each
//! candidate in its bucket, the total haversine distance to every other
//! location and reports its local optimum. The coordinator keeps the global
//! minimum, preferring the candidate seen first in dataset order on ties.

use crate::coordinator::Coordinator;
use crate::dataset::{CoordinateTable, Location, Lookup};
use crate::metric::distance;
use crate::stats::aggregator::{LocalOptimum, MinDistanceAggregate};
use crate::stats::RunSummary;
use crate::worker::Job;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

/// Assumed average travel speed
pub const TRAVEL_SPEED_KMH: f64 = 60.0;

/// Emission factor: kilograms of CO2 per 100 km travelled
pub const CARBON_KG_PER_100_KM: f64 = 0.12;

/// Finds the local optimum among one bucket of candidates
///
/// Items are ordinals into the shared [`CoordinateTable`].
pub struct MeetingPointJob;

impl Job for MeetingPointJob {
    type Item = usize;
    type Context = CoordinateTable;
    type Partial = Option<LocalOptimum>;

    fn execute(
        worker_id: usize,
        bucket: &[usize],
        table: &CoordinateTable,
    ) -> Result<Option<LocalOptimum>> {
        let mut best: Option<LocalOptimum> = None;

        for &ordinal in bucket {
            let host = table
                .get(ordinal)
                .with_context(|| format!("candidate {} is not in the coordinate table", ordinal))?;
            let total_km = total_distance_from(worker_id, host, table);

            if best.as_ref().map_or(true, |b| total_km < b.total_km) {
                best = Some(LocalOptimum {
                    ordinal,
                    location: host.name.clone(),
                    total_km,
                });
            }
        }

        Ok(best)
    }
}

/// Sum of distances from `host` to every other location in the table
pub fn total_distance_from(worker_id: usize, host: &Location, table: &CoordinateTable) -> f64 {
    table
        .iter()
        .filter(|other| other.key != host.key)
        .map(|other| {
            let km = distance(&host.coord, &other.coord);
            log::debug!("worker {}: {} -> {} = {:.2} km", worker_id, host.name, other.name, km);
            km
        })
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPointReport {
    /// Winning location
    pub location: String,
    /// Total distance from the winner to every other location, in km
    pub total_km: f64,
    /// Travel time at [`TRAVEL_SPEED_KMH`], in hours
    pub travel_hours: f64,
    /// Estimated emission at [`CARBON_KG_PER_100_KM`], in kg
    pub carbon_kg: f64,
    /// Locations that took part, in dataset order
    pub candidates: Vec<String>,
    /// Requested names the dataset did not contain
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl MeetingPointReport {
    pub fn new(winner: LocalOptimum, candidates: Vec<String>, missing: Vec<String>) -> Self {
        Self {
            location: winner.location,
            total_km: winner.total_km,
            travel_hours: winner.total_km / TRAVEL_SPEED_KMH,
            carbon_kg: winner.total_km / 100.0 * CARBON_KG_PER_100_KM,
            candidates,
            missing,
        }
    }
}

/// Find the meeting point among the resolved locations
///
/// # Errors
///
/// Fails if no requested location was found, or if any worker fails.
pub fn run(coordinator: &Coordinator, lookup: Lookup) -> Result<(MeetingPointReport, RunSummary)> {
    let Lookup { table, missing, .. } = lookup;
    if table.is_empty() {
        anyhow::bail!("none of the requested locations were found in the dataset");
    }

    let candidates: Vec<String> = table.iter().map(|l| l.name.clone()).collect();
    let ordinals: Vec<usize> = (0..table.len()).collect();

    let completed = coordinator
        .run::<MeetingPointJob, _>(ordinals, Arc::new(table), MinDistanceAggregate::new())
        .context("meeting-point run failed")?;

    let winner = completed
        .aggregate
        .into_best()
        .context("no worker reported a candidate")?;

    Ok((MeetingPointReport::new(winner, candidates, missing), completed.summary))
}
