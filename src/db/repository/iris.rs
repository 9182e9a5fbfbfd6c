use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{IrisRecord, NewIrisPrediction};

use super::parse_timestamp;

/// Insert a served iris prediction and return the refreshed record.
pub fn insert_iris_prediction(
    conn: &Connection,
    row: &NewIrisPrediction,
) -> Result<IrisRecord, DatabaseError> {
    conn.execute(
        "INSERT INTO iris_predictions (sepal_length, sepal_width, petal_length, petal_width,
         prediction, client_addr)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            row.sepal_length,
            row.sepal_width,
            row.petal_length,
            row.petal_width,
            row.prediction,
            row.client_addr,
        ],
    )?;
    get_iris_prediction(conn, conn.last_insert_rowid())
}

/// Read one iris prediction by id.
pub fn get_iris_prediction(conn: &Connection, id: i64) -> Result<IrisRecord, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, sepal_length, sepal_width, petal_length, petal_width,
             prediction, predicted_at, client_addr
             FROM iris_predictions WHERE id = ?1",
            params![id],
            |row| Ok(iris_row_from_rusqlite(row)),
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            table: IrisRecord::SCHEMA.table,
            id,
        })??;

    iris_from_row(row)
}

// Internal row type for IrisRecord mapping
struct IrisRow {
    id: i64,
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    prediction: String,
    predicted_at: String,
    client_addr: String,
}

fn iris_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<IrisRow, rusqlite::Error> {
    Ok(IrisRow {
        id: row.get(0)?,
        sepal_length: row.get(1)?,
        sepal_width: row.get(2)?,
        petal_length: row.get(3)?,
        petal_width: row.get(4)?,
        prediction: row.get(5)?,
        predicted_at: row.get(6)?,
        client_addr: row.get(7)?,
    })
}

fn iris_from_row(row: IrisRow) -> Result<IrisRecord, DatabaseError> {
    Ok(IrisRecord {
        id: row.id,
        sepal_length: row.sepal_length,
        sepal_width: row.sepal_width,
        petal_length: row.petal_length,
        petal_width: row.petal_width,
        prediction: row.prediction,
        predicted_at: parse_timestamp(&row.predicted_at)?,
        client_addr: row.client_addr,
    })
}
