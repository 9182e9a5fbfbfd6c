use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "mlserve";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address when `MLSERVE_ADDR` is unset.
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Get the application data directory (`~/.mlserve/`).
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".mlserve")
}

/// Path of the SQLite database file.
///
/// `MLSERVE_DB` overrides the default location under the app data dir.
pub fn database_path() -> PathBuf {
    match std::env::var("MLSERVE_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("mlserve.db"),
    }
}

/// Directory holding the serialized estimator parameter files.
///
/// Defaults to `resources/models` relative to the working directory,
/// which matches running the service from a checkout.
pub fn models_dir() -> PathBuf {
    match std::env::var("MLSERVE_MODELS_DIR") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from("resources/models"),
    }
}

/// Socket address the HTTP server binds to.
pub fn bind_addr() -> Result<SocketAddr, String> {
    let raw = std::env::var("MLSERVE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    raw.parse()
        .map_err(|e| format!("Invalid MLSERVE_ADDR '{raw}': {e}"))
}

/// Base URL of the review-analysis agent service.
pub fn agent_base_url() -> String {
    std::env::var("MLSERVE_AGENT_URL").unwrap_or_else(|_| "http://localhost:2024".to_string())
}

/// Model name passed through to the agent service.
pub fn agent_model() -> String {
    std::env::var("MLSERVE_AGENT_MODEL").unwrap_or_else(|_| "review-analyst".to_string())
}
