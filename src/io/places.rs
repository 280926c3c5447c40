//! CSV place list reader.
//!
//! Expected header: `Name,Lat,Lon`, optionally followed by `Open` and
//! `Close` columns holding hours since the tour starts. Blank time cells
//! mean "no bound".

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Point, TimeWindow};

/// Errors raised while reading a place list.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The file could not be opened.
    #[error("could not open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is malformed, misses a required column or holds an
    /// unparseable number.
    #[error("row {row}: {source}")]
    Csv {
        /// 1-based data row, 0 for the header.
        row: u64,
        #[source]
        source: csv::Error,
    },

    /// The header lacks one of the required columns.
    #[error("missing required column '{0}' (need Name, Lat, Lon)")]
    MissingColumn(&'static str),

    #[error("row {row}: place name cannot be empty")]
    EmptyName { row: u64 },

    #[error("row {row}: coordinates must be finite, got ({lat}, {lon})")]
    InvalidCoordinates { row: u64, lat: f64, lon: f64 },

    #[error("row {row}: 'Open' time ({open}) must be before 'Close' time ({close})")]
    InvalidTimeWindow { row: u64, open: f64, close: f64 },

    #[error("row {row}: time must be finite, got {value}")]
    InvalidTime { row: u64, value: f64 },

    /// The file has a header but no data rows.
    #[error("no places found")]
    NoPlaces,
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Lat")]
    lat: f64,
    #[serde(rename = "Lon")]
    lon: f64,
    #[serde(rename = "Open", default)]
    open: Option<f64>,
    #[serde(rename = "Close", default)]
    close: Option<f64>,
}

impl PlaceRecord {
    fn into_point(self, row: u64) -> Result<Point, PlacesError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PlacesError::EmptyName { row });
        }
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(PlacesError::InvalidCoordinates {
                row,
                lat: self.lat,
                lon: self.lon,
            });
        }
        for value in [self.open, self.close].into_iter().flatten() {
            if !value.is_finite() {
                return Err(PlacesError::InvalidTime { row, value });
            }
        }
        let tw = TimeWindow::new(self.open, self.close).ok_or(PlacesError::InvalidTimeWindow {
            row,
            open: self.open.unwrap_or_default(),
            close: self.close.unwrap_or_default(),
        })?;
        Ok(Point::new(name, self.lat, self.lon).with_time_window(tw))
    }
}

/// Reads places from CSV data.
///
/// # Examples
///
/// ```
/// use u_tour::io::read_places;
///
/// let data = "Name,Lat,Lon,Open,Close\n\
///             Eiffel Tower,48.8584,2.2945,,\n\
///             Louvre Museum,48.8606,2.3376,9,18\n";
/// let places = read_places(data.as_bytes()).unwrap();
/// assert_eq!(places.len(), 2);
/// assert_eq!(places[1].open_time(), Some(9.0));
/// assert_eq!(places[0].close_time(), None);
/// ```
pub fn read_places<R: Read>(reader: R) -> Result<Vec<Point>, PlacesError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| PlacesError::Csv { row: 0, source })?
        .clone();
    for column in ["Name", "Lat", "Lon"] {
        if !headers.iter().any(|h| h == column) {
            return Err(PlacesError::MissingColumn(column));
        }
    }

    let mut places = Vec::new();
    for (idx, record) in rdr.deserialize::<PlaceRecord>().enumerate() {
        let row = idx as u64 + 1;
        let record = record.map_err(|source| PlacesError::Csv { row, source })?;
        places.push(record.into_point(row)?);
    }

    if places.is_empty() {
        return Err(PlacesError::NoPlaces);
    }
    log::info!("loaded {} places", places.len());
    Ok(places)
}

/// Reads places from a CSV file.
pub fn read_places_from_path(path: impl AsRef<Path>) -> Result<Vec<Point>, PlacesError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PlacesError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_places(file)
}
