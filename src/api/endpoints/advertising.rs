//! Advertising sales prediction endpoint.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::db::repository;
use crate::estimator;
use crate::models::{AdvertisingRecord, NewAdvertisingPrediction};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestAdvertising {
    pub tv: f64,
    pub radio: f64,
    pub newspaper: f64,
}

#[derive(Serialize)]
pub struct AdvertisingPredictionResponse {
    pub prediction: f64,
    pub db_record: AdvertisingRecord,
}

/// `POST /prediction/advertising` — predict sales and log the prediction.
pub async fn predict(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<RequestAdvertising>,
) -> Result<Json<AdvertisingPredictionResponse>, ApiError> {
    let features = vec![req.tv, req.radio, req.newspaper];
    let prediction =
        estimator::regress_one(state.advertising_regressor.as_ref(), features)?;

    let row = NewAdvertisingPrediction {
        tv: req.tv,
        radio: req.radio,
        newspaper: req.newspaper,
        prediction,
        client_addr: addr.ip().to_string(),
    };

    let conn = state.open_db()?;
    let record = repository::insert_advertising_prediction(&conn, &row)?;

    Ok(Json(AdvertisingPredictionResponse {
        prediction,
        db_record: record,
    }))
}
