//! Annealing loop over segment-reversal moves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::AnnealConfig;
use crate::constructive::greedy_construct;
use crate::distance::DistanceMatrix;
use crate::error::TourError;
use crate::models::{validate_path, PathShape};

/// Where the annealing search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialTour<'a> {
    /// Start from this path. Must be closed in return-to-start mode.
    Path(&'a [usize]),
    /// Build a nearest-neighbor path from this start index first.
    Start(usize),
}

/// Result of a simulated annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealResult {
    /// Best path seen, same shape as the initial path. The first position
    /// (the start point) is never moved.
    pub path: Vec<usize>,

    /// Length of `path`. Never above `initial_distance`.
    pub distance: f64,

    /// Length of the initial path.
    pub initial_distance: f64,

    /// Total number of moves evaluated.
    pub iterations: usize,

    /// Number of temperature levels completed.
    pub temperature_steps: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best distance after each temperature level, starting with the
    /// initial distance. Non-increasing.
    pub cost_history: Vec<f64>,
}

impl AnnealResult {
    fn unchanged(path: Vec<usize>, distance: f64, temperature: f64) -> Self {
        Self {
            path,
            distance,
            initial_distance: distance,
            iterations: 0,
            temperature_steps: 0,
            final_temperature: temperature,
            accepted_moves: 0,
            improving_moves: 0,
            cancelled: false,
            cost_history: vec![distance],
        }
    }
}

/// Improves a path by simulated annealing.
///
/// The start position stays fixed. Each move picks two distinct positions
/// `i < j` among the remaining positions of the core, reverses `core[i..=j]` and evaluates the full length.
/// Improvements are always accepted; a worsening move by `delta` is
/// accepted with probability `exp(-delta / T)`. The best path ever seen is
/// returned.
///
/// All randomness comes from `rng`, so a seeded generator gives a
/// reproducible run. A core with fewer than two movable positions (one or
/// two points) is returned unchanged without drawing from `rng`.
///
/// # Errors
///
/// [`TourError::InvalidAnnealConfig`] for an unusable schedule, plus the
/// start-index and path-shape errors of
/// [`greedy_construct`] and [`validate_path`].
///
/// # Examples
///
/// ```
/// use u_tour::anneal::{simulated_anneal, AnnealConfig, InitialTour};
/// use u_tour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let config = AnnealConfig::default().with_min_temperature(1.0);
/// let result = simulated_anneal(&dm, InitialTour::Start(0), true, &config, &mut rng).unwrap();
/// assert_eq!(result.path.first(), result.path.last());
/// assert_eq!(result.distance, 80.0);
/// ```
pub fn simulated_anneal<R: Rng>(
    distances: &DistanceMatrix,
    initial: InitialTour<'_>,
    must_return_to_start: bool,
    config: &AnnealConfig,
    rng: &mut R,
) -> Result<AnnealResult, TourError> {
    simulated_anneal_with_cancel(distances, initial, must_return_to_start, config, rng, None)
}

/// Runs simulated annealing with an optional cancellation token, checked
/// before each temperature level.
pub fn simulated_anneal_with_cancel<R: Rng>(
    distances: &DistanceMatrix,
    initial: InitialTour<'_>,
    must_return_to_start: bool,
    config: &AnnealConfig,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<AnnealResult, TourError> {
    config.validate()?;

    let n = distances.size();
    if n == 0 {
        return Ok(AnnealResult::unchanged(Vec::new(), 0.0, config.initial_temperature));
    }

    let initial_path = match initial {
        InitialTour::Path(path) => path.to_vec(),
        InitialTour::Start(start) => {
            greedy_construct(distances, start, must_return_to_start, None)?
                .into_parts()
                .0
        }
    };
    let shape = PathShape::from_return_flag(must_return_to_start);
    let closed = shape.is_closed();
    let core = validate_path(&initial_path, n, shape)?;

    if n == 1 {
        let path = if closed { vec![0, 0] } else { vec![0] };
        return Ok(AnnealResult::unchanged(path, 0.0, config.initial_temperature));
    }

    let mut current = core.to_vec();
    let len = current.len();
    let mut current_cost = distances.core_distance(&current, closed);
    let initial_distance = current_cost;

    // Position 0 holds the start point; fewer than two movable positions
    // leaves nothing to reverse.
    if len < 3 {
        return Ok(AnnealResult::unchanged(
            initial_path,
            initial_distance,
            config.initial_temperature,
        ));
    }

    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut temperature = config.initial_temperature;
    let mut iterations = 0usize;
    let mut steps = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut cancelled = false;
    let mut cost_history = vec![best_cost];

    while temperature >= config.min_temperature {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }

        for _ in 0..config.iterations_per_temperature {
            let (i, j) = pick_segment(len, rng);
            current[i..=j].reverse();
            let candidate_cost = distances.core_distance(&current, closed);
            let delta = candidate_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                let probability = (-delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current_cost = candidate_cost;
                accepted_moves += 1;
                if current_cost < best_cost {
                    best.copy_from_slice(&current);
                    best_cost = current_cost;
                }
            } else {
                current[i..=j].reverse();
            }
            iterations += 1;
        }

        cost_history.push(best_cost);
        temperature *= config.cooling_rate;
        steps += 1;

        if steps % 100 == 0 {
            log::debug!(
                "anneal: step {steps}, T={temperature:.4}, current {current_cost:.3}, best {best_cost:.3}"
            );
        }
    }

    log::info!(
        "anneal: {initial_distance:.3} -> {best_cost:.3} after {iterations} moves over {steps} temperature levels"
    );

    if closed {
        best.push(best[0]);
    }

    Ok(AnnealResult {
        path: best,
        distance: best_cost,
        initial_distance,
        iterations,
        temperature_steps: steps,
        final_temperature: temperature,
        accepted_moves,
        improving_moves,
        cancelled,
        cost_history,
    })
}

/// Draws two distinct positions in `1..len`, returned in ascending order.
fn pick_segment<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(1..len);
    let mut b = rng.random_range(1..len - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}
