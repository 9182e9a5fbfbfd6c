//! HTTP server lifecycle.
//!
//! Bind → spawn the serve task → return a handle with a shutdown
//! channel. `main` starts the server and waits; tests start it on an
//! ephemeral port and drive it with a real HTTP client.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::state::AppState;

/// Handle to a running API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the serve task to finish.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

/// Start the API server on the given address.
///
/// Binds (port 0 picks an ephemeral port), builds the router with
/// connect-info so handlers see the caller's address, and spawns the
/// serve loop in a background task.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "API server binding");

    let app = api_router(state).into_make_service_with_connect_info::<SocketAddr>();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        handle,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests — full request/response flows over a real socket
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use serde_json::{json, Value};

    async fn start_test_server(agent_response: Value) -> (ApiServer, tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state_with_agent(dir.path().join("server.db"), agent_response);
        let server = start_server(state, "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");
        let base = format!("http://{}", server.addr);
        (server, dir, base)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (mut server, _dir, base) = start_test_server(json!({})).await;
        assert!(server.addr.port() > 0);

        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _dir, _base) = start_test_server(json!({})).await;
        server.shutdown();
        server.shutdown(); // Second call should be safe
    }

    #[tokio::test]
    async fn iris_prediction_persists_and_responds() {
        let (mut server, _dir, base) = start_test_server(json!({})).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/prediction/iris"))
            .json(&json!({
                "sepal_length": 5.1,
                "sepal_width": 3.5,
                "petal_length": 1.4,
                "petal_width": 0.2
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["prediction"], "Iris-setosa");
        assert_eq!(body["db_record"]["prediction"], "Iris-setosa");
        assert_eq!(body["db_record"]["id"], 1);
        assert_eq!(body["db_record"]["client_addr"], "127.0.0.1");
        assert!(body["db_record"]["predicted_at"].as_str().unwrap().len() > 10);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn advertising_prediction_persists_and_responds() {
        let (mut server, _dir, base) = start_test_server(json!({})).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/prediction/advertising"))
            .json(&json!({"tv": 230.1, "radio": 37.8, "newspaper": 69.2}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        let prediction = body["prediction"].as_f64().unwrap();
        assert!(prediction > 15.0 && prediction < 25.0);
        assert_eq!(body["db_record"]["prediction"].as_f64().unwrap(), prediction);
        assert_eq!(body["db_record"]["client_addr"], "127.0.0.1");

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn review_analysis_end_to_end() {
        // The canonical scenario: agent returns a structured_response
        // envelope; the stored record and response carry its fields.
        let (mut server, _dir, base) = start_test_server(json!({
            "structured_response": {
                "rating": 5,
                "sentiment": "positive",
                "key_points": ["great quality", "fast delivery"]
            }
        }))
        .await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/llm/chat"))
            .json(&json!({
                "user": "john_doe",
                "product": "Wireless Headphones XYZ",
                "review": "Amazing product! 5 stars. Quick delivery and great quality, but quite pricey."
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["analysis"]["rating"], 5);
        assert_eq!(body["analysis"]["sentiment"], "positive");
        assert_eq!(body["analysis"]["key_points"][1], "fast delivery");

        let record = &body["db_record"];
        assert_eq!(record["user_info"], "john_doe");
        assert_eq!(record["product"], "Wireless Headphones XYZ");
        assert!(record["review"].as_str().unwrap().starts_with("Amazing product!"));
        assert_eq!(record["rate"], 5);
        assert_eq!(record["sentiment"], "positive");
        assert_eq!(record["key_points"], r#"["great quality","fast delivery"]"#);
        assert!(record["id"].as_i64().unwrap() > 0);
        assert!(record["created_at"].as_str().unwrap().len() > 10);
        // The review table has no client address column
        assert!(record.get("client_addr").is_none());

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn review_analysis_from_tool_call_fallback() {
        let (mut server, _dir, base) = start_test_server(json!({
            "messages": [
                {"content": "analyzing"},
                {"tool_calls": [{"args": {
                    "rating": 3,
                    "sentiment": "negative",
                    "key_points": ["battery drains fast"]
                }}]}
            ]
        }))
        .await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/llm/chat"))
            .json(&json!({"review": "Decent watch but battery life is disappointing. 3 stars."}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["analysis"]["rating"], 3);
        // Missing user/product fall back to sentinels
        assert_eq!(body["db_record"]["user_info"], "anonymous");
        assert_eq!(body["db_record"]["product"], "unknown");

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn malformed_agent_output_degrades_to_empty_analysis() {
        // Not an error: the record is written with null analysis fields.
        let (mut server, _dir, base) = start_test_server(json!("free text, no structure")).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/llm/chat"))
            .json(&json!({"user": "jane_smith", "review": "It's fine I guess."}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["analysis"]["rating"], Value::Null);
        assert_eq!(body["db_record"]["rate"], Value::Null);
        assert_eq!(body["db_record"]["sentiment"], Value::Null);
        assert_eq!(body["db_record"]["key_points"], "[]");

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn empty_review_is_rejected() {
        let (mut server, _dir, base) = start_test_server(json!({})).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/llm/chat"))
            .json(&json!({"review": "   "}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn each_request_writes_exactly_one_record() {
        let (mut server, dir, base) = start_test_server(json!({
            "structured_response": {"rating": 4, "sentiment": "positive", "key_points": []}
        }))
        .await;

        let client = reqwest::Client::new();
        for _ in 0..3 {
            let resp = client
                .post(format!("{base}/llm/chat"))
                .json(&json!({"review": "Good."}))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::OK);
        }

        let conn = crate::db::open_database(&dir.path().join("server.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM review_analyses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        server.shutdown();
        server.wait().await;
    }
}
