//! Great-circle distance on a spherical Earth.

/// Mean Earth radius used by [`haversine`], in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two latitude/longitude pairs
/// given in degrees.
///
/// # Examples
///
/// ```
/// use u_tour::distance::haversine;
///
/// // Eiffel Tower to the Louvre, roughly 3.2 km.
/// let d = haversine(48.8584, 2.2945, 48.8606, 2.3376);
/// assert!((d - 3.16).abs() < 0.05);
/// assert_eq!(d, haversine(48.8606, 2.3376, 48.8584, 2.2945));
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    // Absolute differences keep the result bit-identical when the endpoints
    // are swapped.
    let dlat = (lat2 - lat1).abs();
    let dlon = (lon2 - lon1).abs();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards asin against a rounding overshoot for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}
