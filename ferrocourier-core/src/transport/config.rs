use serde::Deserialize;

use crate::Error;

/// Parameters of the Sinkhorn solver
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SinkhornConfig {
    /// Entropic regularization strength, must be positive
    pub epsilon: f64,
    /// Number of scaling iterations
    pub max_iterations: usize,
    /// Stop early once the largest row marginal deviation drops below this
    pub tolerance: Option<f64>,
}

impl Default for SinkhornConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            max_iterations: 200,
            tolerance: None,
        }
    }
}

impl SinkhornConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// # Errors
    ///
    /// `InvalidTransportInput` for a non-positive epsilon or tolerance
    pub fn validate(&self) -> Result<(), Error> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::InvalidTransportInput(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if let Some(tolerance) = self.tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(Error::InvalidTransportInput(format!(
                    "tolerance must be finite and > 0, got {tolerance}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_fixed_iterations() {
        let config = SinkhornConfig::default();
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.tolerance, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(SinkhornConfig::new().with_epsilon(0.0).validate().is_err());
        assert!(SinkhornConfig::new().with_epsilon(-1.0).validate().is_err());
        assert!(SinkhornConfig::new().with_epsilon(f64::NAN).validate().is_err());
        assert!(SinkhornConfig::new().with_tolerance(0.0).validate().is_err());
        assert!(SinkhornConfig::new().with_tolerance(1e-9).validate().is_ok());
    }
}
