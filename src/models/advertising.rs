use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordSchema;

/// One served sales prediction, as stored.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertisingRecord {
    pub id: i64,
    pub tv: f64,
    pub radio: f64,
    pub newspaper: f64,
    pub prediction: f64,
    pub predicted_at: DateTime<Utc>,
    pub client_addr: String,
}

impl AdvertisingRecord {
    pub const SCHEMA: RecordSchema = RecordSchema {
        table: "advertising_predictions",
        captures_client_addr: true,
    };
}

/// Insert payload — id and timestamp are assigned by the database.
#[derive(Debug, Clone)]
pub struct NewAdvertisingPrediction {
    pub tv: f64,
    pub radio: f64,
    pub newspaper: f64,
    pub prediction: f64,
    pub client_addr: String,
}
