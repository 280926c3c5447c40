//! # u-tour
//!
//! City tour optimization over geographic points: a short visiting order,
//! open or returning to start, with optional opening-hour constraints.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, TimeWindow, Tour, path shapes)
//! - [`distance`] — Haversine distance and travel time matrices
//! - [`constructive`] — Nearest-neighbor construction with time windows
//! - [`local_search`] — 2-opt improvement
//! - [`anneal`] — Simulated annealing with a caller-supplied RNG
//! - [`io`] — CSV places, GeoJSON routes, start selection (feature `io`)
//!
//! ## Example
//!
//! ```
//! use u_tour::constructive::greedy_construct;
//! use u_tour::distance::DistanceMatrix;
//! use u_tour::local_search::{two_opt_improve, TwoOptConfig};
//! use u_tour::models::Point;
//!
//! let points = vec![
//!     Point::new("Eiffel Tower", 48.8584, 2.2945),
//!     Point::new("Louvre Museum", 48.8606, 2.3376),
//!     Point::new("Notre-Dame", 48.8530, 2.3499),
//!     Point::new("Arc de Triomphe", 48.8738, 2.2950),
//! ];
//! let dm = DistanceMatrix::from_points(&points);
//! let initial = greedy_construct(&dm, 0, true, None).unwrap();
//! let refined = two_opt_improve(&dm, initial.path(), true, &TwoOptConfig::default()).unwrap();
//! assert!(refined.distance <= initial.distance());
//! ```

pub mod anneal;
pub mod constructive;
pub mod distance;
pub mod error;
#[cfg(feature = "io")]
pub mod io;
pub mod local_search;
pub mod models;

pub use error::{ErrorKind, TourError};
