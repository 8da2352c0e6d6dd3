use sqlx::Row;

use crate::repository::{SessionRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionRecord, StorageError> {
    Ok(SessionRecord {
        user_id: row.try_get("user_id").map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        name: row.try_get("name").map_err(ser)?,
        picture: row.try_get("picture").map_err(ser)?,
        token: row.try_get("token").map_err(ser)?,
        issued_at: row.try_get("issued_at").map_err(ser)?,
        expires_at: row.try_get("expires_at").map_err(ser)?,
    })
}
