use std::path::Path;

use serde::Deserialize;

use super::{load_json, EstimatorError};

/// Maps encoded class indices back to their string labels.
///
/// Mirrors the inverse-transform half of a fitted label encoder; the
/// forward direction is never needed at serving time.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Load encoder classes from a JSON parameter file.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let encoder: LabelEncoder = load_json(path)?;
        if encoder.classes.is_empty() {
            return Err(EstimatorError::InvalidModel("encoder has no classes".into()));
        }
        Ok(encoder)
    }

    /// Decode a sequence of encoded indices into labels.
    ///
    /// Indices arrive as floats because the estimator contract is
    /// numeric; they are rounded before lookup.
    pub fn inverse_transform(&self, encoded: &[f64]) -> Result<Vec<String>, EstimatorError> {
        encoded
            .iter()
            .map(|&raw| {
                let index = raw.round();
                if index < 0.0 {
                    return Err(EstimatorError::UnknownLabel(0));
                }
                let index = index as usize;
                self.classes
                    .get(index)
                    .cloned()
                    .ok_or(EstimatorError::UnknownLabel(index))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris_encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Iris-setosa".to_string(),
            "Iris-versicolor".to_string(),
            "Iris-virginica".to_string(),
        ])
    }

    #[test]
    fn inverse_transform_decodes_in_order() {
        let labels = iris_encoder().inverse_transform(&[0.0, 2.0, 1.0]).unwrap();
        assert_eq!(labels, vec!["Iris-setosa", "Iris-virginica", "Iris-versicolor"]);
    }

    #[test]
    fn out_of_range_index_is_error() {
        let result = iris_encoder().inverse_transform(&[3.0]);
        assert!(matches!(result, Err(EstimatorError::UnknownLabel(3))));
    }

    #[test]
    fn negative_index_is_error() {
        let result = iris_encoder().inverse_transform(&[-1.0]);
        assert!(matches!(result, Err(EstimatorError::UnknownLabel(_))));
    }
}
