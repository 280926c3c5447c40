//! Start place selection from user input.

use crate::models::Point;

/// Resolves a user's start-place answer to a point index.
///
/// Blank input picks the first place. A number is read as a 1-based
/// position in the list. Anything else is matched case-insensitively
/// against place names. Returns `None` when nothing matches.
///
/// # Examples
///
/// ```
/// use u_tour::io::resolve_start;
/// use u_tour::models::Point;
///
/// let places = vec![Point::new("Louvre", 48.86, 2.34), Point::new("Notre-Dame", 48.85, 2.35)];
/// assert_eq!(resolve_start(&places, ""), Some(0));
/// assert_eq!(resolve_start(&places, "2"), Some(1));
/// assert_eq!(resolve_start(&places, "notre-dame"), Some(1));
/// assert_eq!(resolve_start(&places, "3"), None);
/// ```
pub fn resolve_start(places: &[Point], input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (!places.is_empty()).then_some(0);
    }
    if let Ok(number) = input.parse::<usize>() {
        return (1..=places.len()).contains(&number).then(|| number - 1);
    }
    places
        .iter()
        .position(|p| p.name().to_lowercase() == input.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Point> {
        vec![
            Point::new("Eiffel Tower", 48.8584, 2.2945),
            Point::new("Louvre Museum", 48.8606, 2.3376),
            Point::new("Notre-Dame", 48.8530, 2.3499),
        ]
    }

    #[test]
    fn test_blank_is_first() {
        assert_eq!(resolve_start(&places(), "   "), Some(0));
        assert_eq!(resolve_start(&[], ""), None);
    }

    #[test]
    fn test_number_is_one_based() {
        assert_eq!(resolve_start(&places(), "1"), Some(0));
        assert_eq!(resolve_start(&places(), " 3 "), Some(2));
        assert_eq!(resolve_start(&places(), "0"), None);
        assert_eq!(resolve_start(&places(), "4"), None);
    }

    #[test]
    fn test_name_case_insensitive() {
        assert_eq!(resolve_start(&places(), "LOUVRE MUSEUM"), Some(1));
        assert_eq!(resolve_start(&places(), "Louvre"), None);
    }
}
