//! Nearest-neighbor constructive heuristic with optional time windows.
//!
//! # Algorithm
//!
//! Starting from the chosen point, repeatedly step to the unvisited point
//! with the smallest plain distance. Ties go to the lowest index.
//!
//! With a [`TimeWindowContext`], a running clock follows the path. A
//! candidate whose arrival would be after its closing time is skipped; an
//! early arrival waits until opening. Selection still uses distance, not
//! time. When no candidate remains reachable, construction stops and the
//! result is marked [`Coverage::Partial`].
//!
//! # Complexity
//!
//! O(n²) where n = number of points.

use crate::distance::DistanceMatrix;
use crate::error::TourError;
use crate::models::{Coverage, Point, Tour};

/// Points and travel times needed to enforce time windows.
///
/// Bundles both inputs so time-window mode is either fully on or off.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindowContext<'a> {
    points: &'a [Point],
    travel_times: &'a DistanceMatrix,
}

impl<'a> TimeWindowContext<'a> {
    /// Creates a context. `travel_times` must cover exactly `points`.
    pub fn new(points: &'a [Point], travel_times: &'a DistanceMatrix) -> Result<Self, TourError> {
        if points.len() != travel_times.size() {
            return Err(TourError::ContextSizeMismatch {
                context: points.len(),
                matrix: travel_times.size(),
            });
        }
        Ok(Self {
            points,
            travel_times,
        })
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    pub fn travel_times(&self) -> &'a DistanceMatrix {
        self.travel_times
    }

    fn size(&self) -> usize {
        self.points.len()
    }

    /// Arrival time at `to` when leaving `from` at `clock`.
    fn arrival(&self, from: usize, to: usize, clock: f64) -> f64 {
        clock + self.travel_times.get(from, to)
    }
}

/// Builds a path by always moving to the nearest eligible unvisited point.
///
/// When `must_return_to_start` is set and every point was visited, the
/// start point is appended again. Under time windows the return leg is
/// dropped if it would arrive after the start point closes, and the tour is
/// marked [`Coverage::Unclosed`].
///
/// The reported distance sums only edges actually travelled; waiting never
/// adds to it.
///
/// # Errors
///
/// [`TourError::StartIndexOutOfRange`] if `start` is not a point index, and
/// [`TourError::ContextSizeMismatch`] if the context does not match the matrix.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::constructive::greedy_construct;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let tour = greedy_construct(&dm, 0, true, None).unwrap();
/// assert_eq!(tour.path(), &[0, 1, 3, 2, 0]);
/// assert_eq!(tour.distance(), 80.0);
/// ```
pub fn greedy_construct(
    distances: &DistanceMatrix,
    start: usize,
    must_return_to_start: bool,
    time_windows: Option<TimeWindowContext<'_>>,
) -> Result<Tour, TourError> {
    let n = distances.size();
    if n == 0 {
        return Ok(Tour::empty());
    }
    if start >= n {
        return Err(TourError::StartIndexOutOfRange { index: start, size: n });
    }
    if let Some(ctx) = &time_windows {
        if ctx.size() != n {
            return Err(TourError::ContextSizeMismatch {
                context: ctx.size(),
                matrix: n,
            });
        }
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut path = Vec::with_capacity(n + 1);
    path.push(start);
    let mut current = start;
    let mut total_distance = 0.0;
    let mut clock = time_windows
        .as_ref()
        .and_then(|ctx| ctx.points[start].open_time())
        .map_or(0.0, |open| open.max(0.0));

    while path.len() < n {
        let mut best: Option<(usize, f64)> = None;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            if let Some(ctx) = &time_windows {
                let arrival = ctx.arrival(current, candidate, clock);
                if ctx.points[candidate].time_window().is_violated(arrival) {
                    continue;
                }
            }
            let d = distances.get(current, candidate);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }

        let Some((next, d)) = best else {
            break;
        };

        if let Some(ctx) = &time_windows {
            let arrival = ctx.arrival(current, next, clock);
            clock = arrival + ctx.points[next].time_window().waiting_time(arrival);
        }
        visited[next] = true;
        path.push(next);
        total_distance += d;
        current = next;
    }

    if path.len() < n {
        log::warn!(
            "greedy: time windows left {} of {} points unreachable, path is partial",
            n - path.len(),
            n
        );
        let count = path.len();
        return Ok(Tour::new(
            path,
            total_distance,
            Coverage::Partial {
                visited: count,
                total: n,
            },
        ));
    }

    if must_return_to_start {
        if let Some(ctx) = &time_windows {
            let arrival = ctx.arrival(current, start, clock);
            if ctx.points[start].time_window().is_violated(arrival) {
                log::warn!(
                    "greedy: return to start would arrive at {arrival:.2}, after closing; path left open"
                );
                return Ok(Tour::new(path, total_distance, Coverage::Unclosed));
            }
        }
        total_distance += distances.get(current, start);
        path.push(start);
    }

    log::debug!("greedy: built path of {} nodes, distance {total_distance:.3}", path.len());
    Ok(Tour::new(path, total_distance, Coverage::Complete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn classic() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .expect("valid")
    }

    /// Points on a line with unit spacing, paired with an explicit matrix.
    fn line(windows: &[(Option<f64>, Option<f64>)]) -> (Vec<Point>, DistanceMatrix) {
        let n = windows.len();
        let points = windows
            .iter()
            .enumerate()
            .map(|(i, &(open, close))| {
                Point::new(format!("P{i}"), 0.0, i as f64)
                    .with_time_window(TimeWindow::new(open, close).expect("valid"))
            })
            .collect();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect::<Vec<Vec<f64>>>();
        (points, DistanceMatrix::from_rows(&rows).expect("valid"))
    }

    #[test]
    fn test_greedy_closed() {
        let tour = greedy_construct(&classic(), 0, true, None).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 3, 2, 0]);
        assert_eq!(tour.distance(), 80.0);
        assert!(tour.is_complete());
    }

    #[test]
    fn test_greedy_open() {
        let tour = greedy_construct(&classic(), 0, false, None).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 3, 2]);
        assert_eq!(tour.distance(), 65.0);
    }

    #[test]
    fn test_greedy_two_points() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).expect("valid");
        let tour = greedy_construct(&dm, 0, true, None).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 0]);
        assert_eq!(tour.distance(), 2.0);
    }

    #[test]
    fn test_greedy_single_point() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0]]).expect("valid");
        assert_eq!(greedy_construct(&dm, 0, true, None).expect("valid").path(), &[0, 0]);
        assert_eq!(greedy_construct(&dm, 0, false, None).expect("valid").path(), &[0]);
    }

    #[test]
    fn test_greedy_empty() {
        let dm = DistanceMatrix::from_rows(&[]).expect("valid");
        let tour = greedy_construct(&dm, 0, true, None).expect("valid");
        assert!(tour.path().is_empty());
        assert_eq!(tour.distance(), 0.0);
    }

    #[test]
    fn test_greedy_invalid_start() {
        let err = greedy_construct(&classic(), 4, true, None).unwrap_err();
        assert_eq!(err, TourError::StartIndexOutOfRange { index: 4, size: 4 });
    }

    #[test]
    fn test_greedy_tie_prefers_lower_index() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 5.0, 5.0],
            vec![5.0, 0.0, 1.0],
            vec![5.0, 1.0, 0.0],
        ])
        .expect("valid");
        let tour = greedy_construct(&dm, 0, false, None).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 2]);
    }

    #[test]
    fn test_greedy_other_start() {
        let tour = greedy_construct(&classic(), 2, true, None).expect("valid");
        // From 2: 0 (15), then 1 (10), then 3 (25), back to 2 (30).
        assert_eq!(tour.path(), &[2, 0, 1, 3, 2]);
        assert_eq!(tour.distance(), 80.0);
    }

    #[test]
    fn test_context_size_mismatch() {
        let (points, dm) = line(&[(None, None), (None, None)]);
        let tt = classic();
        assert!(TimeWindowContext::new(&points, &tt).is_err());

        let ctx = TimeWindowContext::new(&points, &dm).expect("sizes match");
        let err = greedy_construct(&classic(), 0, false, Some(ctx)).unwrap_err();
        assert_eq!(err, TourError::ContextSizeMismatch { context: 2, matrix: 4 });
    }

    #[test]
    fn test_tw_all_open_matches_plain() {
        let (points, dm) = line(&[(None, None), (None, Some(100.0)), (Some(0.0), Some(100.0))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let with_tw = greedy_construct(&dm, 0, true, Some(ctx)).expect("valid");
        let plain = greedy_construct(&dm, 0, true, None).expect("valid");
        assert_eq!(with_tw, plain);
    }

    #[test]
    fn test_tw_excludes_closed_point() {
        // P1 is nearest but closes before it can be reached; P2 is still open.
        let (points, dm) = line(&[(None, None), (None, Some(0.5)), (None, Some(10.0))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, false, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 2]);
        assert_eq!(tour.distance(), 2.0);
        assert_eq!(tour.coverage(), Coverage::Partial { visited: 2, total: 3 });
        assert!(!tour.is_complete());
    }

    #[test]
    fn test_tw_partial_skips_return() {
        let (points, dm) = line(&[(None, None), (None, Some(10.0)), (None, Some(1.5))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        // 0 -> 1 at t=1, then 2 would arrive at t=2 > 1.5.
        let tour = greedy_construct(&dm, 0, true, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 1]);
        assert_eq!(tour.coverage(), Coverage::Partial { visited: 2, total: 3 });
    }

    #[test]
    fn test_tw_waiting_does_not_add_distance() {
        // P1 opens at 5: arrive at 1, wait until 5, then P2 at 6 <= 6.
        let (points, dm) = line(&[(None, None), (Some(5.0), Some(8.0)), (None, Some(6.0))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, false, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 2]);
        assert_eq!(tour.distance(), 2.0);
        assert!(tour.is_complete());
    }

    #[test]
    fn test_tw_waiting_can_make_later_point_unreachable() {
        // Same as above but P2 closes at 5.5: waiting at P1 makes it late.
        let (points, dm) = line(&[(None, None), (Some(5.0), Some(8.0)), (None, Some(5.5))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, false, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 1]);
        assert!(!tour.is_complete());
    }

    #[test]
    fn test_tw_clock_starts_at_start_opening() {
        // Start opens at 3, so P1 (closing at 3.5) is reached at 4: too late.
        let (points, dm) = line(&[(Some(3.0), None), (None, Some(3.5))]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, false, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0]);
        assert_eq!(tour.coverage(), Coverage::Partial { visited: 1, total: 2 });
    }

    #[test]
    fn test_tw_return_leg_infeasible() {
        // Start closes at 3; tour 0 -> 1 -> 2 ends at t=2, return arrives at 4.
        let (points, dm) = line(&[(None, Some(3.0)), (None, None), (None, None)]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, true, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 2]);
        assert_eq!(tour.distance(), 2.0);
        assert_eq!(tour.coverage(), Coverage::Unclosed);
        assert!(!tour.is_closed());
    }

    #[test]
    fn test_tw_return_leg_feasible() {
        let (points, dm) = line(&[(None, Some(4.0)), (None, None), (None, None)]);
        let ctx = TimeWindowContext::new(&points, &dm).expect("valid");
        let tour = greedy_construct(&dm, 0, true, Some(ctx)).expect("valid");
        assert_eq!(tour.path(), &[0, 1, 2, 0]);
        assert_eq!(tour.distance(), 4.0);
        assert!(tour.is_complete());
    }

    #[test]
    fn test_tw_speed_scales_arrival() {
        // Distance 1 per hop at speed 0.5 means 2 hours per hop.
        let (points, dm) = line(&[(None, None), (None, Some(1.5)), (None, None)]);
        let tt = dm.travel_times(0.5).expect("positive");
        let ctx = TimeWindowContext::new(&points, &tt).expect("valid");
        let tour = greedy_construct(&dm, 0, false, Some(ctx)).expect("valid");
        // P1 unreachable (arrival 2 > 1.5), P2 reachable, then P1 never.
        assert_eq!(tour.path(), &[0, 2]);
        assert!(!tour.is_complete());
    }
}
