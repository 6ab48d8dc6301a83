use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::AppError;
use crate::preferences::PreferenceStore;

#[derive(Clone)]
pub struct SqlitePreferenceStore {
    db: SqlitePool,
}

impl SqlitePreferenceStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens (creating if needed) the database at `database_url` and runs
    /// migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

pub async fn migrate(db: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(db).await?;
    Ok(())
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::COLOR_KEY;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        migrate(&pool).await.expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = SqlitePreferenceStore::new(setup_test_db().await);

        assert_eq!(store.get(COLOR_KEY).await.unwrap(), None);

        store.set(COLOR_KEY, "light").await.unwrap();
        assert_eq!(store.get(COLOR_KEY).await.unwrap().as_deref(), Some("light"));

        store.set(COLOR_KEY, "dark").await.unwrap();
        assert_eq!(store.get(COLOR_KEY).await.unwrap().as_deref(), Some("dark"));

        store.remove(COLOR_KEY).await.unwrap();
        assert_eq!(store.get(COLOR_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_keeps_single_row() {
        let store = SqlitePreferenceStore::new(setup_test_db().await);

        store.set("lang", "en").await.unwrap();
        store.set("lang", "si").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM preferences")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
