use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{AdvertisingRecord, NewAdvertisingPrediction};

use super::parse_timestamp;

/// Insert a served sales prediction and return the refreshed record.
pub fn insert_advertising_prediction(
    conn: &Connection,
    row: &NewAdvertisingPrediction,
) -> Result<AdvertisingRecord, DatabaseError> {
    conn.execute(
        "INSERT INTO advertising_predictions (tv, radio, newspaper, prediction, client_addr)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![row.tv, row.radio, row.newspaper, row.prediction, row.client_addr],
    )?;
    get_advertising_prediction(conn, conn.last_insert_rowid())
}

/// Read one sales prediction by id.
pub fn get_advertising_prediction(
    conn: &Connection,
    id: i64,
) -> Result<AdvertisingRecord, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, tv, radio, newspaper, prediction, predicted_at, client_addr
             FROM advertising_predictions WHERE id = ?1",
            params![id],
            |row| Ok(advertising_row_from_rusqlite(row)),
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            table: AdvertisingRecord::SCHEMA.table,
            id,
        })??;

    advertising_from_row(row)
}

// Internal row type for AdvertisingRecord mapping
struct AdvertisingRow {
    id: i64,
    tv: f64,
    radio: f64,
    newspaper: f64,
    prediction: f64,
    predicted_at: String,
    client_addr: String,
}

fn advertising_row_from_rusqlite(
    row: &rusqlite::Row<'_>,
) -> Result<AdvertisingRow, rusqlite::Error> {
    Ok(AdvertisingRow {
        id: row.get(0)?,
        tv: row.get(1)?,
        radio: row.get(2)?,
        newspaper: row.get(3)?,
        prediction: row.get(4)?,
        predicted_at: row.get(5)?,
        client_addr: row.get(6)?,
    })
}

fn advertising_from_row(row: AdvertisingRow) -> Result<AdvertisingRecord, DatabaseError> {
    Ok(AdvertisingRecord {
        id: row.id,
        tv: row.tv,
        radio: row.radio,
        newspaper: row.newspaper,
        prediction: row.prediction,
        predicted_at: parse_timestamp(&row.predicted_at)?,
        client_addr: row.client_addr,
    })
}
