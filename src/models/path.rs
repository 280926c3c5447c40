//! Path shape checks shared by the refiners.

use crate::error::TourError;

/// Whether a path returns to its first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// Each index appears once; `len == N` for a full path.
    Open,
    /// First index repeated as the last element; `len == N + 1` for a full tour.
    Closed,
}

impl PathShape {
    /// Maps the return-to-start flag onto a shape.
    pub fn from_return_flag(must_return_to_start: bool) -> Self {
        if must_return_to_start {
            PathShape::Closed
        } else {
            PathShape::Open
        }
    }

    pub fn is_closed(self) -> bool {
        self == PathShape::Closed
    }
}

/// Checks `path` against `shape` over `size` points and returns its core.
///
/// The core is the path without the repeated start node of a closed path.
/// Fails if a closed path does not end where it starts, an index is out of
/// range, or an index repeats inside the core. A one-element closed path is
/// only accepted when there is a single point.
///
/// # Examples
///
/// ```
/// use u_tour::models::{validate_path, PathShape};
///
/// let core = validate_path(&[0, 2, 1, 0], 3, PathShape::Closed).unwrap();
/// assert_eq!(core, &[0, 2, 1]);
///
/// assert!(validate_path(&[0, 2, 1], 3, PathShape::Closed).is_err());
/// assert!(validate_path(&[0, 2, 0], 3, PathShape::Open).is_err());
/// ```
pub fn validate_path(path: &[usize], size: usize, shape: PathShape) -> Result<&[usize], TourError> {
    let core = match shape {
        PathShape::Closed => match (path.first(), path.last()) {
            (Some(first), Some(last)) if first == last => {
                if path.len() > 1 {
                    &path[..path.len() - 1]
                } else if size <= 1 {
                    path
                } else {
                    return Err(TourError::PathNotClosed);
                }
            }
            _ => return Err(TourError::PathNotClosed),
        },
        PathShape::Open => path,
    };

    let mut seen = vec![false; size];
    for &index in core {
        if index >= size {
            return Err(TourError::PathIndexOutOfRange { index, size });
        }
        if seen[index] {
            return Err(TourError::DuplicateIndex { index });
        }
        seen[index] = true;
    }
    Ok(core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_core() {
        assert_eq!(
            validate_path(&[1, 0, 2, 1], 3, PathShape::Closed),
            Ok(&[1, 0, 2][..])
        );
    }

    #[test]
    fn test_closed_requires_return() {
        assert_eq!(
            validate_path(&[0, 1, 2], 3, PathShape::Closed),
            Err(TourError::PathNotClosed)
        );
        assert_eq!(
            validate_path(&[], 3, PathShape::Closed),
            Err(TourError::PathNotClosed)
        );
    }

    #[test]
    fn test_open_empty_is_valid() {
        assert_eq!(validate_path(&[], 0, PathShape::Open), Ok(&[][..]));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            validate_path(&[0, 5], 3, PathShape::Open),
            Err(TourError::PathIndexOutOfRange { index: 5, size: 3 })
        );
    }

    #[test]
    fn test_duplicate_interior() {
        assert_eq!(
            validate_path(&[0, 1, 1, 0], 3, PathShape::Closed),
            Err(TourError::DuplicateIndex { index: 1 })
        );
    }

    #[test]
    fn test_single_node_closed() {
        assert_eq!(
            validate_path(&[0, 0], 1, PathShape::Closed),
            Ok(&[0][..])
        );
    }

    #[test]
    fn test_single_element_closed_needs_single_point() {
        assert_eq!(
            validate_path(&[1], 3, PathShape::Closed),
            Err(TourError::PathNotClosed)
        );
        assert_eq!(validate_path(&[0], 1, PathShape::Closed), Ok(&[0][..]));
    }
}
