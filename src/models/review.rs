use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordSchema;

/// One analyzed product review, as stored.
///
/// `rate` and `sentiment` stay null when the agent produced no usable
/// structured output — a missing rating is never defaulted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAnalysisRecord {
    pub id: i64,
    pub user_info: String,
    pub product: String,
    pub review: String,
    pub rate: Option<i64>,
    pub sentiment: Option<String>,
    /// JSON-encoded array of key point phrases, order preserved.
    pub key_points: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewAnalysisRecord {
    pub const SCHEMA: RecordSchema = RecordSchema {
        table: "review_analyses",
        captures_client_addr: false,
    };
}

/// Insert payload — id and timestamp are assigned by the database.
///
/// `client_addr` is populated only when the target schema captures it;
/// for `review_analyses` it stays `None` and is never written.
#[derive(Debug, Clone)]
pub struct NewReviewAnalysis {
    pub user_info: String,
    pub product: String,
    pub review: String,
    pub rate: Option<i64>,
    pub sentiment: Option<String>,
    pub key_points: String,
    pub client_addr: Option<String>,
}
