//! GeoJSON route output.
//!
//! Each run appends one `LineString` feature to a `FeatureCollection`, so a
//! single file can collect routes from several runs.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;

use crate::models::Point;

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("could not write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize route: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Builds a GeoJSON `Feature` for a route.
///
/// Coordinates are `[lon, lat]` pairs in visiting order. Properties record
/// the calculation time, point count and first/last place names.
///
/// # Examples
///
/// ```
/// use u_tour::io::route_feature;
/// use u_tour::models::Point;
///
/// let a = Point::new("A", 48.0, 2.0);
/// let b = Point::new("B", 49.0, 3.0);
/// let feature = route_feature(&[&a, &b, &a]);
/// assert_eq!(feature["geometry"]["coordinates"][1][0], 3.0);
/// assert_eq!(feature["properties"]["end_place"], "A");
/// ```
pub fn route_feature(route: &[&Point]) -> Value {
    let coordinates: Vec<[f64; 2]> = route.iter().map(|p| [p.lon(), p.lat()]).collect();
    json!({
        "type": "Feature",
        "properties": {
            "calculated_at": chrono::Local::now().to_rfc3339(),
            "point_count": route.len(),
            "start_place": route.first().map_or("N/A", |p| p.name()),
            "end_place": route.last().map_or("N/A", |p| p.name()),
        },
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        }
    })
}

/// Loads the features of an existing collection at `path`.
///
/// A missing file yields no features. An unreadable or non-collection file
/// is logged and treated as empty, so it is replaced on write.
fn existing_features(path: &Path) -> Vec<Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log::warn!("could not read existing '{}' ({e}); it will be overwritten", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(mut obj))
            if obj.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
        {
            match obj.remove("features") {
                Some(Value::Array(features)) => {
                    log::info!("loaded {} existing features from '{}'", features.len(), path.display());
                    features
                }
                _ => {
                    log::warn!("'{}' has no feature list; it will be overwritten", path.display());
                    Vec::new()
                }
            }
        }
        Ok(_) => {
            log::warn!(
                "'{}' is not a GeoJSON FeatureCollection; it will be overwritten",
                path.display()
            );
            Vec::new()
        }
        Err(e) => {
            log::warn!("'{}' is not valid JSON ({e}); it will be overwritten", path.display());
            Vec::new()
        }
    }
}

/// Appends `route` as a feature to the collection stored at `path`.
///
/// Returns `Ok(false)` without touching the file when the route is empty
/// and there is nothing already stored.
pub fn append_route(path: impl AsRef<Path>, route: &[&Point]) -> Result<bool, GeoJsonError> {
    let path = path.as_ref();
    let mut features = existing_features(path);

    if route.is_empty() {
        log::warn!("no coordinates to write to '{}'", path.display());
        if features.is_empty() {
            return Ok(false);
        }
    } else {
        features.push(route_feature(route));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    let text = serde_json::to_string_pretty(&collection)?;
    fs::write(path, text).map_err(|source| GeoJsonError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(true)
}
