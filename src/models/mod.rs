//! Domain model types for city tours.
//!
//! Provides named geographic points with optional opening hours, the tour
//! result type with its coverage status, and path shape checks.

mod path;
mod point;
mod tour;

pub use path::{validate_path, PathShape};
pub use point::{Point, TimeWindow};
pub use tour::{Coverage, Tour};
