use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NewReviewAnalysis, ReviewAnalysisRecord};

use super::parse_timestamp;

/// Insert an analyzed review and return the refreshed record.
///
/// The `review_analyses` table has no client address column
/// (`ReviewAnalysisRecord::SCHEMA`), so the payload's `client_addr`
/// is not part of the INSERT.
pub fn insert_review_analysis(
    conn: &Connection,
    row: &NewReviewAnalysis,
) -> Result<ReviewAnalysisRecord, DatabaseError> {
    conn.execute(
        "INSERT INTO review_analyses (user_info, product, review, rate, sentiment, key_points)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            row.user_info,
            row.product,
            row.review,
            row.rate,
            row.sentiment,
            row.key_points,
        ],
    )?;
    get_review_analysis(conn, conn.last_insert_rowid())
}

/// Read one review analysis by id.
pub fn get_review_analysis(
    conn: &Connection,
    id: i64,
) -> Result<ReviewAnalysisRecord, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, user_info, product, review, rate, sentiment, key_points, created_at
             FROM review_analyses WHERE id = ?1",
            params![id],
            |row| Ok(review_row_from_rusqlite(row)),
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            table: ReviewAnalysisRecord::SCHEMA.table,
            id,
        })??;

    review_from_row(row)
}

// Internal row type for ReviewAnalysisRecord mapping
struct ReviewRow {
    id: i64,
    user_info: String,
    product: String,
    review: String,
    rate: Option<i64>,
    sentiment: Option<String>,
    key_points: String,
    created_at: String,
}

fn review_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<ReviewRow, rusqlite::Error> {
    Ok(ReviewRow {
        id: row.get(0)?,
        user_info: row.get(1)?,
        product: row.get(2)?,
        review: row.get(3)?,
        rate: row.get(4)?,
        sentiment: row.get(5)?,
        key_points: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn review_from_row(row: ReviewRow) -> Result<ReviewAnalysisRecord, DatabaseError> {
    Ok(ReviewAnalysisRecord {
        id: row.id,
        user_info: row.user_info,
        product: row.product,
        review: row.review,
        rate: row.rate,
        sentiment: row.sentiment,
        key_points: row.key_points,
        created_at: parse_timestamp(&row.created_at)?,
    })
}
