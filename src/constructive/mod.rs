//! Constructive heuristics for building an initial tour.
//!
//! - [`greedy_construct`] — Nearest-neighbor, optionally time-window aware, O(n²)

mod greedy;

pub use greedy::{greedy_construct, TimeWindowContext};
