//! Dense distance matrix.

use super::haversine::haversine;
use crate::error::TourError;
use crate::models::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per point set and read-only afterwards. Matrices produced by
/// this type are symmetric, have a zero diagonal and no negative entries.
///
/// # Examples
///
/// ```
/// use u_tour::models::Point;
/// use u_tour::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new("Eiffel Tower", 48.8584, 2.2945),
///     Point::new("Louvre Museum", 48.8606, 2.3376),
///     Point::new("Notre-Dame", 48.8530, 2.3499),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 1), dm.get(1, 0));
/// assert_eq!(dm.get(2, 2), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a great-circle distance matrix in kilometers.
    ///
    /// Only the upper triangle is evaluated; the lower triangle mirrors it,
    /// so `get(i, j) == get(j, i)` holds exactly.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine(points[i].lat(), points[i].lon(), points[j].lat(), points[j].lon());
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// Rows must form a square, symmetric grid of finite, non-negative values.
    /// The diagonal is taken as given.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, TourError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(TourError::NotSquare {
                    row,
                    len: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(TourError::InvalidEntry { row, col, value });
                }
            }
            data.extend_from_slice(values);
        }
        let dm = Self { data, size };
        if let Some((row, col)) = dm.first_asymmetry() {
            return Err(TourError::Asymmetric { row, col });
        }
        Ok(dm)
    }

    /// Derives a travel-time matrix (`distance / speed`) from this one.
    ///
    /// With distances in kilometers and speed in km/h the result is in hours.
    pub fn travel_times(&self, speed: f64) -> Result<Self, TourError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(TourError::InvalidSpeed(speed));
        }
        Ok(Self {
            data: self.data.iter().map(|d| d / speed).collect(),
            size: self.size,
        })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    fn first_asymmetry(&self) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Sums the edges between consecutive indices of `path`.
    ///
    /// A closed path contributes its return edge through the repeated last
    /// index. Empty and single-index paths cost zero.
    pub fn path_distance(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Cost of an open core, plus the edge back to `core[0]` when `closed`.
    pub(crate) fn core_distance(&self, core: &[usize], closed: bool) -> f64 {
        let mut dist = self.path_distance(core);
        if closed {
            if let (Some(&first), Some(&last)) = (core.first(), core.last()) {
                dist += self.get(last, first);
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_rows() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ]
    }

    fn paris() -> Vec<Point> {
        vec![
            Point::new("Eiffel Tower", 48.8584, 2.2945),
            Point::new("Louvre Museum", 48.8606, 2.3376),
            Point::new("Notre-Dame", 48.8530, 2.3499),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&paris());
        assert_eq!(dm.size(), 3);
        assert!(dm.get(0, 1) > 3.0 && dm.get(0, 1) < 3.3);
        for i in 0..3 {
            assert_eq!(dm.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(dm.get(i, j), dm.get(j, i));
                assert!(dm.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = DistanceMatrix::from_points(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.size(), 0);

        let single = DistanceMatrix::from_points(&paris()[..1]);
        assert_eq!(single.size(), 1);
        assert_eq!(single.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(&classic_rows()).expect("valid");
        assert_eq!(dm.get(1, 3), 25.0);
        assert!(dm.is_symmetric(0.0));
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, TourError::NotSquare { row: 1, len: 1, size: 2 });
    }

    #[test]
    fn test_from_rows_negative() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, TourError::InvalidEntry { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_from_rows_asymmetric() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 10.0], vec![15.0, 0.0]]).unwrap_err();
        assert_eq!(err, TourError::Asymmetric { row: 0, col: 1 });
    }

    #[test]
    fn test_travel_times() {
        let dm = DistanceMatrix::from_rows(&classic_rows()).expect("valid");
        let tt = dm.travel_times(5.0).expect("positive speed");
        assert!((tt.get(0, 1) - 2.0).abs() < 1e-12);
        assert!((tt.get(2, 3) - 6.0).abs() < 1e-12);
        assert!(tt.is_symmetric(0.0));
    }

    #[test]
    fn test_travel_times_rejects_bad_speed() {
        let dm = DistanceMatrix::from_rows(&classic_rows()).expect("valid");
        assert_eq!(dm.travel_times(0.0), Err(TourError::InvalidSpeed(0.0)));
        assert_eq!(dm.travel_times(-40.0), Err(TourError::InvalidSpeed(-40.0)));
        assert!(dm.travel_times(f64::NAN).is_err());
    }

    #[test]
    fn test_path_distance() {
        let dm = DistanceMatrix::from_rows(&classic_rows()).expect("valid");
        assert_eq!(dm.path_distance(&[0, 1, 3, 2, 0]), 80.0);
        assert_eq!(dm.path_distance(&[0, 1, 3, 2]), 65.0);
        assert_eq!(dm.path_distance(&[2]), 0.0);
        assert_eq!(dm.path_distance(&[]), 0.0);
    }

    #[test]
    fn test_core_distance_closes_cycle() {
        let dm = DistanceMatrix::from_rows(&classic_rows()).expect("valid");
        assert_eq!(dm.core_distance(&[0, 1, 3, 2], true), 80.0);
        assert_eq!(dm.core_distance(&[0, 1, 3, 2], false), 65.0);
        assert_eq!(dm.core_distance(&[], true), 0.0);
    }
}
