use async_trait::async_trait;
use datapath_core::model::Session;

use crate::repository::{SessionRecord, SessionRepository, StorageError};

use super::SqliteRepository;
use super::mapping::map_session_row;

fn conn(err: sqlx::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, email, name, picture, token, issued_at, expires_at
            FROM cached_session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        map_session_row(&row)?.into_session().map(Some)
    }

    async fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let record = SessionRecord::from_session(session);
        sqlx::query(
            r"
            INSERT INTO cached_session (
                id, user_id, email, name, picture, token, issued_at, expires_at
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                email = excluded.email,
                name = excluded.name,
                picture = excluded.picture,
                token = excluded.token,
                issued_at = excluded.issued_at,
                expires_at = excluded.expires_at
            ",
        )
        .bind(&record.user_id)
        .bind(&record.email)
        .bind(&record.name)
        .bind(record.picture.as_deref())
        .bind(&record.token)
        .bind(record.issued_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM cached_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
