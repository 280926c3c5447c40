//! Input and output around the optimizer.
//!
//! - [`read_places`] — CSV place lists (`Name,Lat,Lon[,Open,Close]`)
//! - [`append_route`] — GeoJSON `FeatureCollection` output
//! - [`resolve_start`] — start place lookup by number or name

mod geojson;
mod places;
mod start;

pub use geojson::{append_route, route_feature, GeoJsonError};
pub use places::{read_places, read_places_from_path, PlacesError};
pub use start::resolve_start;
