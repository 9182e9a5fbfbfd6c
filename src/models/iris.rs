use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordSchema;

/// One served iris classification, as stored.
#[derive(Debug, Clone, Serialize)]
pub struct IrisRecord {
    pub id: i64,
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    /// Decoded species label.
    pub prediction: String,
    pub predicted_at: DateTime<Utc>,
    pub client_addr: String,
}

impl IrisRecord {
    pub const SCHEMA: RecordSchema = RecordSchema {
        table: "iris_predictions",
        captures_client_addr: true,
    };
}

/// Insert payload — id and timestamp are assigned by the database.
#[derive(Debug, Clone)]
pub struct NewIrisPrediction {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub prediction: String,
    pub client_addr: String,
}
