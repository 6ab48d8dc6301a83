pub mod sqlite;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::AppError;

pub use sqlite::SqlitePreferenceStore;

/// Stored color scheme: `"light"` or `"dark"`. No entry means auto.
pub const COLOR_KEY: &str = "color";
/// Locale tag for the translation layer.
pub const LANG_KEY: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";

/// Key-value storage that survives restarts.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Stored locale, or `"en"` when nothing usable is stored.
pub async fn locale(store: &dyn PreferenceStore) -> String {
    match store.get(LANG_KEY).await {
        Ok(Some(lang)) if !lang.is_empty() => lang,
        Ok(_) => DEFAULT_LOCALE.to_string(),
        Err(e) => {
            warn!("Failed to read locale preference: {}", e);
            DEFAULT_LOCALE.to_string()
        }
    }
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
