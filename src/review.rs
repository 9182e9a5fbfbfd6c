//! Review analysis domain logic: the canonical analysis shape, the agent
//! prompt, and the field normalizer that maps an extracted analysis plus
//! the original request into the persisted row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{NewReviewAnalysis, ReviewAnalysisRecord};

/// Sentinel stored when the request carried no user identifier.
pub const ANONYMOUS_USER: &str = "anonymous";
/// Sentinel stored when the request carried no product name.
pub const UNKNOWN_PRODUCT: &str = "unknown";

/// System prompt sent with every agent invocation.
pub const SYSTEM_PROMPT: &str = "Analyze product reviews and extract structured data.";

/// Incoming review analysis request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub user: Option<String>,
    pub product: Option<String>,
    pub review: String,
}

/// Canonical structured analysis of one product review.
///
/// This is what the extractor/normalizer always produce, regardless of
/// which shape the agent backend returned. Every field tolerates
/// absence — a fully empty analysis is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub rating: Option<i64>,
    pub sentiment: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl ReviewAnalysis {
    pub fn empty() -> Self {
        Self {
            rating: None,
            sentiment: None,
            key_points: Vec::new(),
        }
    }
}

/// Build the user prompt for one review.
pub fn build_prompt(review: &str) -> String {
    format!(
        "Analyze the following product review and provide a rating (1-5), \
         sentiment (positive/negative), and 3 key points: {review}"
    )
}

/// Normalize an extracted analysis map into the canonical shape.
///
/// - `rating` is kept only when it is an integer in 1..=5; anything else
///   becomes `None` — no clamping, no default.
/// - `sentiment` passes through verbatim; enum validation happened (or
///   didn't) upstream in the agent's schema.
/// - `key_points` keeps the string elements in order; absence is an
///   empty list.
pub fn normalize_analysis(extracted: &Map<String, Value>) -> ReviewAnalysis {
    let rating = extracted
        .get("rating")
        .and_then(Value::as_i64)
        .filter(|r| (1..=5).contains(r));

    let sentiment = extracted
        .get("sentiment")
        .and_then(Value::as_str)
        .map(str::to_string);

    let key_points = extracted
        .get("key_points")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ReviewAnalysis {
        rating,
        sentiment,
        key_points,
    }
}

/// Serialize key points to the stored JSON text.
///
/// Order is preserved and non-ASCII characters are written verbatim,
/// not escaped.
pub fn encode_key_points(points: &[String]) -> String {
    serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string())
}

/// Assemble the insert payload from the request and normalized analysis.
///
/// The client address is attached only when the target record type's
/// schema descriptor says the table has that column.
pub fn build_review_row(
    request: &ReviewRequest,
    analysis: &ReviewAnalysis,
    client_addr: &str,
) -> NewReviewAnalysis {
    NewReviewAnalysis {
        user_info: request
            .user
            .clone()
            .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        product: request
            .product
            .clone()
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
        review: request.review.clone(),
        rate: analysis.rating,
        sentiment: analysis.sentiment.clone(),
        key_points: encode_key_points(&analysis.key_points),
        client_addr: ReviewAnalysisRecord::SCHEMA
            .captures_client_addr
            .then(|| client_addr.to_string()),
    }
}
