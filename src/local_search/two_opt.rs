//! 2-opt improvement of a single path.
//!
//! # Algorithm
//!
//! For every position pair `(i, j)` with `1 <= i <= len-3` and
//! `i+2 <= j <= len-1` over the open core of the path, reverse the segment
//! `core[i..=j]`. If the resulting path is strictly shorter, keep it and
//! continue scanning from the same position (first-improvement). A pass
//! without any accepted move ends the search.
//!
//! The first element is never moved, so the path keeps its start point.
//! Adjacent pairs (`j == i+1`) are skipped.
//!
//! # Complexity
//!
//! O(n²) candidates per pass. Each candidate costs O(n) with
//! [`MoveEvaluation::FullRecompute`] and O(1) with [`MoveEvaluation::Delta`].
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::distance::DistanceMatrix;
use crate::error::TourError;
use crate::models::{validate_path, PathShape};

/// How the length of a candidate path is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveEvaluation {
    /// Sum every edge of the candidate. No floating-point drift between
    /// the accepted length and the path.
    #[default]
    FullRecompute,
    /// Compare only the two exchanged edges. Makes the same decisions as
    /// [`MoveEvaluation::FullRecompute`] for well-conditioned distances, but
    /// may differ on near-ties.
    Delta,
}

/// Configuration for [`two_opt_improve`].
///
/// # Examples
///
/// ```
/// use u_tour::local_search::{MoveEvaluation, TwoOptConfig};
///
/// let config = TwoOptConfig::default()
///     .with_max_passes(50)
///     .with_evaluation(MoveEvaluation::Delta);
/// assert_eq!(config.max_passes, 50);
/// ```
#[derive(Debug, Clone)]
pub struct TwoOptConfig {
    /// Maximum number of full passes over all position pairs.
    pub max_passes: usize,

    /// Candidate evaluation strategy.
    pub evaluation: MoveEvaluation,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_passes: 1000,
            evaluation: MoveEvaluation::default(),
        }
    }
}

impl TwoOptConfig {
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_evaluation(mut self, evaluation: MoveEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }
}

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptResult {
    /// Improved path, same shape as the input.
    pub path: Vec<usize>,

    /// Total length of `path`.
    pub distance: f64,

    /// Number of passes started.
    pub passes: usize,

    /// Number of accepted segment reversals.
    pub improvements: usize,

    /// `true` if a full pass found no improvement (local optimum).
    ///
    /// `false` means the pass cap was hit or the run was cancelled; the
    /// path is still valid and no worse than the input.
    pub converged: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Applies 2-opt improvement to a path.
///
/// With `must_return_to_start` the path must be closed
/// (`path[0] == path[len-1]`); the repeated start is stripped for the search
/// and restored in the result. Paths whose core has fewer than 4 nodes are
/// returned unchanged.
///
/// # Errors
///
/// [`TourError::PathNotClosed`] for an open path in return-to-start mode,
/// and [`TourError::PathIndexOutOfRange`] / [`TourError::DuplicateIndex`]
/// for malformed paths.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::local_search::{two_opt_improve, TwoOptConfig};
///
/// // Five points on a line, visited out of order.
/// let rows: Vec<Vec<f64>> = (0..5)
///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(&rows).unwrap();
///
/// let result = two_opt_improve(&dm, &[0, 3, 2, 1, 4], false, &TwoOptConfig::default()).unwrap();
/// assert_eq!(result.path, vec![0, 1, 2, 3, 4]);
/// assert_eq!(result.distance, 4.0);
/// assert!(result.converged);
/// ```
pub fn two_opt_improve(
    distances: &DistanceMatrix,
    initial_path: &[usize],
    must_return_to_start: bool,
    config: &TwoOptConfig,
) -> Result<TwoOptResult, TourError> {
    two_opt_improve_with_cancel(distances, initial_path, must_return_to_start, config, None)
}

/// Runs 2-opt with an optional cancellation token, checked before each pass.
pub fn two_opt_improve_with_cancel(
    distances: &DistanceMatrix,
    initial_path: &[usize],
    must_return_to_start: bool,
    config: &TwoOptConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<TwoOptResult, TourError> {
    let shape = PathShape::from_return_flag(must_return_to_start);
    let core = validate_path(initial_path, distances.size(), shape)?;

    if core.len() < 4 {
        return Ok(TwoOptResult {
            path: initial_path.to_vec(),
            distance: distances.path_distance(initial_path),
            passes: 0,
            improvements: 0,
            converged: true,
            cancelled: false,
        });
    }

    let closed = shape.is_closed();
    let mut core = core.to_vec();
    let len = core.len();
    let mut best = distances.core_distance(&core, closed);
    let initial = best;

    let mut passes = 0usize;
    let mut improvements = 0usize;
    let mut converged = false;
    let mut cancelled = false;

    while passes < config.max_passes {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }
        passes += 1;
        let mut improved = false;

        for i in 1..len - 2 {
            for j in (i + 2)..len {
                let accepted = match config.evaluation {
                    MoveEvaluation::FullRecompute => {
                        core[i..=j].reverse();
                        let candidate = distances.core_distance(&core, closed);
                        if candidate < best {
                            best = candidate;
                            true
                        } else {
                            core[i..=j].reverse();
                            false
                        }
                    }
                    MoveEvaluation::Delta => {
                        let delta = reversal_delta(&core, i, j, closed, distances);
                        if delta < 0.0 {
                            core[i..=j].reverse();
                            best += delta;
                            true
                        } else {
                            false
                        }
                    }
                };
                if accepted {
                    improved = true;
                    improvements += 1;
                }
            }
        }

        log::debug!("2-opt: pass {passes} done, length {best:.3}, improved={improved}");

        if !improved {
            converged = true;
            break;
        }
    }

    // Delta mode accumulates rounding in `best`; report the path's own length.
    let distance = distances.core_distance(&core, closed);
    if closed {
        core.push(core[0]);
    }

    if !converged && !cancelled {
        log::info!("2-opt: stopped at pass cap {} before reaching a local optimum", config.max_passes);
    }
    log::debug!("2-opt: {initial:.3} -> {distance:.3} in {passes} passes ({improvements} moves)");

    Ok(TwoOptResult {
        path: core,
        distance,
        passes,
        improvements,
        converged,
        cancelled,
    })
}

/// Length change from reversing `core[i..=j]` on a symmetric matrix.
///
/// Before: `core[i-1] - core[i] ... core[j] - next`
/// After:  `core[i-1] - core[j] ... core[i] - next`
fn reversal_delta(core: &[usize], i: usize, j: usize, closed: bool, distances: &DistanceMatrix) -> f64 {
    let prev = core[i - 1];
    let next = if j + 1 < core.len() {
        Some(core[j + 1])
    } else if closed {
        Some(core[0])
    } else {
        None
    };

    let mut delta = distances.get(prev, core[j]) - distances.get(prev, core[i]);
    if let Some(next) = next {
        delta += distances.get(core[i], next) - distances.get(core[j], next);
    }
    delta
}
