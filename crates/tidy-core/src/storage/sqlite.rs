use crate::db::DbPool;
use crate::error::CoreError;
use crate::storage::PreferenceStore;
use async_trait::async_trait;
use chrono::Utc;

/// Preference store backed by the `preferences` table of a SQLite database.
pub struct SqlitePreferenceStore {
    pool: DbPool,
}

impl SqlitePreferenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `db_path` and runs migrations.
    pub async fn open(db_path: &str) -> Result<Self, CoreError> {
        let pool = crate::db::establish_connection(db_path).await?;
        Ok(Self::new(pool))
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM preferences WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        sqlx::query(
            r#"INSERT INTO preferences (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM preferences WHERE key = $1")
            .bind(key)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM preferences")
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CoreError> {
        let keys: Vec<(String,)> = sqlx::query_as("SELECT key FROM preferences ORDER BY key")
            .fetch_all(self.pool())
            .await?;
        Ok(keys.into_iter().map(|(key,)| key).collect())
    }
}
