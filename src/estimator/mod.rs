//! Pre-trained classical estimators, loaded once at startup from JSON
//! parameter files and shared read-only across requests.
//!
//! The formatters at the bottom implement the single-row contract the
//! endpoints need: unwrap the one-element prediction vector, and for
//! classification run the label encoder's inverse transform on the
//! encoded class index. No rounding, no unit conversion.

pub mod encoder;
pub mod knn;
pub mod linear;

pub use encoder::LabelEncoder;
pub use knn::KnnClassifier;
pub use linear::LinearRegressor;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("Cannot read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse model file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid model parameters: {0}")]
    InvalidModel(String),

    #[error("Expected {expected} features, got {got}")]
    FeatureShape { expected: usize, got: usize },

    #[error("Estimator returned no prediction")]
    EmptyPrediction,

    #[error("Encoded label {0} out of range")]
    UnknownLabel(usize),
}

/// Pre-trained estimator: a feature matrix in, one numeric output per row.
///
/// Classifiers emit encoded class indices; regressors emit the target
/// value directly.
pub trait Estimator: Send + Sync {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, EstimatorError>;
}

/// Read and deserialize a JSON model parameter file.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, EstimatorError> {
    let raw = std::fs::read_to_string(path).map_err(|e| EstimatorError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&raw).map_err(|e| EstimatorError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Classify a single feature row and decode the label.
pub fn classify_one(
    estimator: &dyn Estimator,
    encoder: &LabelEncoder,
    features: Vec<f64>,
) -> Result<String, EstimatorError> {
    let raw = estimator.predict(std::slice::from_ref(&features))?;
    let labels = encoder.inverse_transform(&raw)?;
    labels.into_iter().next().ok_or(EstimatorError::EmptyPrediction)
}

/// Predict a single feature row and unwrap the scalar output.
pub fn regress_one(
    estimator: &dyn Estimator,
    features: Vec<f64>,
) -> Result<f64, EstimatorError> {
    let raw = estimator.predict(std::slice::from_ref(&features))?;
    raw.into_iter().next().ok_or(EstimatorError::EmptyPrediction)
}
