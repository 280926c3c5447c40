//! Tour result and coverage types.

use serde::{Deserialize, Serialize};

/// How much of the requested tour a result actually covers.
///
/// Anything other than [`Coverage::Complete`] is a degraded, but still
/// usable, outcome caused by time-window constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coverage {
    /// Every point was visited and, if requested, the tour returns to start.
    Complete,
    /// Construction stopped early because no remaining point was reachable
    /// before closing.
    Partial {
        /// Number of points on the path.
        visited: usize,
        /// Number of points in the problem.
        total: usize,
    },
    /// Every point was visited but the return leg would arrive after the
    /// start point closes, so the path was left open.
    Unclosed,
}

/// An ordered visiting sequence with its total distance.
///
/// The distance is computed once from the matrix when the tour is built
/// and the path cannot be mutated afterwards.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::constructive::greedy_construct;
///
/// let dm = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
/// let tour = greedy_construct(&dm, 0, true, None).unwrap();
/// assert_eq!(tour.path(), &[0, 1, 0]);
/// assert!(tour.is_closed());
/// assert!(tour.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    path: Vec<usize>,
    distance: f64,
    coverage: Coverage,
}

impl Tour {
    pub(crate) fn new(path: Vec<usize>, distance: f64, coverage: Coverage) -> Self {
        Self {
            path,
            distance,
            coverage,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new(), 0.0, Coverage::Complete)
    }

    /// Visiting order as point indices.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Total travelled distance in matrix units.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Returns `true` if no constraint degraded the result.
    pub fn is_complete(&self) -> bool {
        self.coverage == Coverage::Complete
    }

    /// Returns `true` if the path starts and ends at the same point.
    pub fn is_closed(&self) -> bool {
        self.path.len() > 1 && self.path.first() == self.path.last()
    }

    /// Consumes the tour, returning the path and its distance.
    pub fn into_parts(self) -> (Vec<usize>, f64) {
        (self.path, self.distance)
    }
}
