use std::path::Path;

use serde::Deserialize;

use super::{load_json, Estimator, EstimatorError};

/// Fitted linear regressor: `y = intercept + coefficients · features`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    /// Load regressor parameters from a JSON file and validate them.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let model: LinearRegressor = load_json(path)?;
        if model.coefficients.is_empty() {
            return Err(EstimatorError::InvalidModel("no coefficients".into()));
        }
        Ok(model)
    }

    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl Estimator for LinearRegressor {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, EstimatorError> {
        let expected = self.coefficients.len();
        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(EstimatorError::FeatureShape {
                        expected,
                        got: row.len(),
                    });
                }
                let dot: f64 = self
                    .coefficients
                    .iter()
                    .zip(row)
                    .map(|(c, x)| c * x)
                    .sum();
                Ok(self.intercept + dot)
            })
            .collect()
    }
}
