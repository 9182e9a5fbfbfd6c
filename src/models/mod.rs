//! Persisted record types, one per endpoint family.
//!
//! Each record type carries a static [`RecordSchema`] descriptor so the
//! normalization layer can tell which optional columns the backing table
//! actually has, instead of probing at runtime.

pub mod advertising;
pub mod iris;
pub mod review;

pub use advertising::{AdvertisingRecord, NewAdvertisingPrediction};
pub use iris::{IrisRecord, NewIrisPrediction};
pub use review::{NewReviewAnalysis, ReviewAnalysisRecord};

/// Static capability descriptor for a persisted record type.
///
/// `captures_client_addr` is false for tables without a client address
/// column; the normalizer consults it before attaching the caller's
/// address rather than failing on an unknown column.
pub struct RecordSchema {
    pub table: &'static str,
    pub captures_client_addr: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_tables_capture_client_addr() {
        assert!(IrisRecord::SCHEMA.captures_client_addr);
        assert!(AdvertisingRecord::SCHEMA.captures_client_addr);
    }

    #[test]
    fn review_table_has_no_client_addr_column() {
        assert!(!ReviewAnalysisRecord::SCHEMA.captures_client_addr);
        assert_eq!(ReviewAnalysisRecord::SCHEMA.table, "review_analyses");
    }
}
