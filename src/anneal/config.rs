//! Annealing configuration and cooling schedule.

use crate::error::TourError;

/// Geometric cooling schedule for [`simulated_anneal`](super::simulated_anneal).
///
/// Temperature starts at `initial_temperature`, runs
/// `iterations_per_temperature` moves, is multiplied by `cooling_rate`, and
/// the run stops once it drops below `min_temperature`. A level at exactly
/// `min_temperature` still runs.
///
/// # Examples
///
/// ```
/// use u_tour::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_rate(0.98)
///     .with_min_temperature(0.01)
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Starting temperature. Higher values accept more worsening moves early.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// The run stops once the temperature falls below this value.
    pub min_temperature: f64,

    /// Number of moves tried at each temperature level.
    pub iterations_per_temperature: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.995,
            min_temperature: 1e-3,
            iterations_per_temperature: 100,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    /// Number of temperature levels this schedule runs through.
    ///
    /// Zero for an invalid configuration.
    pub fn temperature_steps(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t >= self.min_temperature {
            t *= self.cooling_rate;
            steps += 1;
        }
        steps
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TourError> {
        let invalid = |msg: String| Err(TourError::InvalidAnnealConfig(msg));
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return invalid(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return invalid(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return invalid("min_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.iterations_per_temperature == 0 {
            return invalid("iterations_per_temperature must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.995).abs() < 1e-12);
        assert_eq!(config.iterations_per_temperature, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = AnnealConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AnnealConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(AnnealConfig::default().with_cooling_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AnnealConfig::default().with_iterations_per_temperature(0);
        assert!(matches!(
            config.validate(),
            Err(TourError::InvalidAnnealConfig(_))
        ));
    }

    #[test]
    fn test_temperature_steps() {
        let config = AnnealConfig::default()
            .with_initial_temperature(8.0)
            .with_cooling_rate(0.5)
            .with_min_temperature(1.0);
        // 8, 4, 2 and 1 all run; 0.5 stops.
        assert_eq!(config.temperature_steps(), 4);
    }
}
