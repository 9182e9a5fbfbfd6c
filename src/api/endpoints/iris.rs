//! Iris classification endpoint.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::db::repository;
use crate::estimator;
use crate::models::{IrisRecord, NewIrisPrediction};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestIris {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

#[derive(Serialize)]
pub struct IrisPredictionResponse {
    pub prediction: String,
    pub db_record: IrisRecord,
}

/// `POST /prediction/iris` — classify a flower and log the prediction.
pub async fn predict(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<RequestIris>,
) -> Result<Json<IrisPredictionResponse>, ApiError> {
    let features = vec![
        req.sepal_length,
        req.sepal_width,
        req.petal_length,
        req.petal_width,
    ];
    let prediction = estimator::classify_one(
        state.iris_classifier.as_ref(),
        &state.iris_encoder,
        features,
    )?;

    let row = NewIrisPrediction {
        sepal_length: req.sepal_length,
        sepal_width: req.sepal_width,
        petal_length: req.petal_length,
        petal_width: req.petal_width,
        prediction: prediction.clone(),
        client_addr: addr.ip().to_string(),
    };

    let conn = state.open_db()?;
    let record = repository::insert_iris_prediction(&conn, &row)?;

    Ok(Json(IrisPredictionResponse {
        prediction,
        db_record: record,
    }))
}
