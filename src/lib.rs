//! mlserve — HTTP service for classical ML predictions and LLM-backed
//! product review analysis, with every served prediction persisted to
//! SQLite alongside request metadata.
//!
//! Three endpoint families share one pipeline shape:
//! request → backend inference → normalization → persisted record →
//! `{prediction|analysis, db_record}` response. The iris and advertising
//! endpoints run deterministic estimators loaded once at startup; the
//! review endpoint calls an LLM agent whose output shape varies by
//! backend version and is absorbed by `agent::extract`.

pub mod agent;
pub mod api;
pub mod config;
pub mod db;
pub mod estimator;
pub mod models;
pub mod review;
pub mod state;
