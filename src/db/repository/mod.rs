//! Row-level persistence for the prediction log tables.
//!
//! Write contract per record: one INSERT, then the row is re-read by
//! `last_insert_rowid()` so the caller gets the server-assigned id and
//! timestamp back ("refresh"). No updates, no deletes, no retries.

pub mod advertising;
pub mod iris;
pub mod review;

pub use advertising::*;
pub use iris::*;
pub use review::*;

use chrono::{DateTime, Utc};

use super::DatabaseError;

/// Parse a timestamp column written by the schema's strftime default.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidTimestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
