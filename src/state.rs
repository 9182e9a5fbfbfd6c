//! Shared application state.
//!
//! Inference backends are loaded once at startup and treated as
//! read-only afterwards; the only per-request resource is the SQLite
//! connection, opened fresh per handler call.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::agent::{AgentClient, HttpAgentClient};
use crate::config;
use crate::db::{self, DatabaseError};
use crate::estimator::{EstimatorError, KnnClassifier, LabelEncoder, LinearRegressor};

#[derive(Clone)]
pub struct AppState {
    db_path: PathBuf,
    pub iris_classifier: Arc<KnnClassifier>,
    pub iris_encoder: Arc<LabelEncoder>,
    pub advertising_regressor: Arc<LinearRegressor>,
    pub agent: Arc<dyn AgentClient>,
}

/// Failures while assembling the process-wide state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Estimator load failed: {0}")]
    Estimator(#[from] EstimatorError),

    #[error("Database init failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppState {
    /// Load estimators from the configured models directory, prepare the
    /// database file, and wire the environment-configured agent client.
    pub fn initialize() -> Result<Self, StartupError> {
        let db_path = config::database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StartupError::DataDir {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        // Run migrations eagerly so a broken schema fails startup, not
        // the first request.
        db::open_database(&db_path)?;

        let models_dir = config::models_dir();
        let state = Self {
            db_path,
            iris_classifier: Arc::new(KnnClassifier::load(&models_dir.join("iris_knn.json"))?),
            iris_encoder: Arc::new(LabelEncoder::load(&models_dir.join("iris_labels.json"))?),
            advertising_regressor: Arc::new(LinearRegressor::load(
                &models_dir.join("advertising_linear.json"),
            )?),
            agent: Arc::new(HttpAgentClient::from_env()),
        };

        tracing::info!(db = %state.db_path.display(), "Application state initialized");
        Ok(state)
    }

    /// Open a database connection for one request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}
