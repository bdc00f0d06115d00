//! Cost metrics evaluated by executors
//!
//! Metrics are pure functions: they read their inputs, never touch shared state,
//! and are safe to call from any number of executor threads at once.
//!
//! - **Haversine**: great-circle distance in kilometres between two coordinates
//! - **Range sum**: direct accumulation over an inclusive integer sub-range

pub mod haversine;
pub mod range_sum;

pub use haversine::{distance, Coordinate, EARTH_RADIUS_KM};
pub use range_sum::{closed_form_sum, sum_range};
