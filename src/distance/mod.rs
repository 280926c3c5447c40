//! Distance and travel time matrices.
//!
//! Provides haversine great-circle distances and a dense matrix built from
//! them, plus the travel-time matrix derived for time-window checks.

mod haversine;
mod matrix;

pub use haversine::{haversine, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
