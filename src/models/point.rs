//! Point and time window types.

use serde::{Deserialize, Serialize};

/// Opening hours of a point, in hours since the tour starts at time 0.
///
/// Either bound may be absent. When both are present `open < close`.
///
/// # Examples
///
/// ```
/// use u_tour::models::TimeWindow;
///
/// let tw = TimeWindow::new(Some(9.0), Some(18.0)).unwrap();
/// assert!(tw.is_violated(18.5));
/// assert!((tw.waiting_time(8.0) - 1.0).abs() < 1e-10);
///
/// assert!(TimeWindow::new(Some(18.0), Some(9.0)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    open: Option<f64>,
    close: Option<f64>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if a bound is non-finite or `open >= close`.
    pub fn new(open: Option<f64>, close: Option<f64>) -> Option<Self> {
        if open.is_some_and(|t| !t.is_finite()) || close.is_some_and(|t| !t.is_finite()) {
            return None;
        }
        if let (Some(o), Some(c)) = (open, close) {
            if o >= c {
                return None;
            }
        }
        Some(Self { open, close })
    }

    /// Earliest time a visit may start.
    pub fn open(&self) -> Option<f64> {
        self.open
    }

    /// Latest allowable arrival time.
    pub fn close(&self) -> Option<f64> {
        self.close
    }

    /// Returns the waiting time if arriving at the given time.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        match self.open {
            Some(open) if arrival < open => open - arrival,
            _ => 0.0,
        }
    }

    /// Returns `true` if arriving at the given time is after closing.
    pub fn is_violated(&self, arrival: f64) -> bool {
        self.close.is_some_and(|close| arrival > close)
    }
}

/// A named geographic location on the tour.
///
/// # Examples
///
/// ```
/// use u_tour::models::{Point, TimeWindow};
///
/// let louvre = Point::new("Louvre Museum", 48.8606, 2.3376)
///     .with_time_window(TimeWindow::new(Some(9.0), Some(18.0)).unwrap());
/// assert_eq!(louvre.name(), "Louvre Museum");
/// assert_eq!(louvre.close_time(), Some(18.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    time_window: TimeWindow,
}

impl Point {
    /// Creates a point without opening hours.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            time_window: TimeWindow::default(),
        }
    }

    /// Sets the opening hours of this point.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn open_time(&self) -> Option<f64> {
        self.time_window.open()
    }

    pub fn close_time(&self) -> Option<f64> {
        self.time_window.close()
    }
}
