use std::path::Path;

use serde::Deserialize;

use super::{load_json, Estimator, EstimatorError};

/// k-nearest-neighbour classifier over stored training samples.
///
/// Prediction is a majority vote among the k nearest samples by
/// Euclidean distance; ties break toward the smallest encoded label so
/// the output is deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct KnnClassifier {
    k: usize,
    samples: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

impl KnnClassifier {
    /// Load classifier parameters from a JSON file and validate them.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let model: KnnClassifier = load_json(path)?;
        model.validate()?;
        Ok(model)
    }

    pub fn new(k: usize, samples: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self, EstimatorError> {
        let model = Self { k, samples, labels };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), EstimatorError> {
        if self.k == 0 {
            return Err(EstimatorError::InvalidModel("k must be at least 1".into()));
        }
        if self.samples.is_empty() {
            return Err(EstimatorError::InvalidModel("no training samples".into()));
        }
        if self.samples.len() != self.labels.len() {
            return Err(EstimatorError::InvalidModel(format!(
                "{} samples but {} labels",
                self.samples.len(),
                self.labels.len()
            )));
        }
        let width = self.samples[0].len();
        if self.samples.iter().any(|s| s.len() != width) {
            return Err(EstimatorError::InvalidModel("ragged sample matrix".into()));
        }
        Ok(())
    }

    fn feature_width(&self) -> usize {
        self.samples[0].len()
    }

    fn classify(&self, features: &[f64]) -> usize {
        let mut distances: Vec<(f64, usize)> = self
            .samples
            .iter()
            .zip(&self.labels)
            .map(|(sample, &label)| {
                let d2: f64 = sample
                    .iter()
                    .zip(features)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (d2, label)
            })
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = self.k.min(distances.len());
        let mut votes: Vec<usize> = Vec::new();
        for &(_, label) in &distances[..k] {
            if votes.len() <= label {
                votes.resize(label + 1, 0);
            }
            votes[label] += 1;
        }
        votes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(label, _)| label)
            .unwrap_or(0)
    }
}

impl Estimator for KnnClassifier {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, EstimatorError> {
        let expected = self.feature_width();
        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(EstimatorError::FeatureShape {
                        expected,
                        got: row.len(),
                    });
                }
                Ok(self.classify(row) as f64)
            })
            .collect()
    }
}
