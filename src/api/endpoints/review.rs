//! LLM-backed review analysis endpoint.
//!
//! The one pipeline with an unpredictable backend: the agent response is
//! reduced by `agent::extract` to a plain map (empty on malformed
//! output — not an error), normalized into the canonical analysis, and
//! persisted. Agent transport failures do propagate; shape problems
//! never do.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::Serialize;

use crate::agent::extract_structured;
use crate::api::error::ApiError;
use crate::db::repository;
use crate::models::ReviewAnalysisRecord;
use crate::review::{self, ReviewAnalysis, ReviewRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReviewChatResponse {
    pub analysis: ReviewAnalysis,
    pub db_record: ReviewAnalysisRecord,
}

/// `POST /llm/chat` — analyze a product review and log the analysis.
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewChatResponse>, ApiError> {
    if req.review.trim().is_empty() {
        return Err(ApiError::BadRequest("Review text cannot be empty".into()));
    }

    let prompt = review::build_prompt(&req.review);
    let agent = Arc::clone(&state.agent);
    // reqwest::blocking must not run on the async reactor.
    let response = tokio::task::spawn_blocking(move || agent.invoke(&prompt))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let extracted = extract_structured(&response);
    let analysis = review::normalize_analysis(&extracted);
    let row = review::build_review_row(&req, &analysis, &addr.ip().to_string());

    let conn = state.open_db()?;
    let record = repository::insert_review_analysis(&conn, &row)?;

    Ok(Json(ReviewChatResponse {
        analysis,
        db_record: record,
    }))
}
