pub mod dto;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::AppError;

pub use dto::{AllResponse, WeekPayload};

pub const DEFAULT_API_PATH: &str = "http://localhost:8080/api/";

#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// Base path of the timetable backend. `all` is appended as-is, so it
    /// normally ends with a slash.
    pub api_path: String,
}

impl SourceConfig {
    pub fn new(api_path: impl Into<String>) -> Self {
        Self { api_path: api_path.into() }
    }

    pub fn all_url(&self) -> String {
        format!("{}all", self.api_path)
    }
}

#[async_trait]
pub trait TimetableSource: Send + Sync {
    async fn fetch_all(&self) -> Result<AllResponse, AppError>;
}

pub struct HttpTimetableSource {
    client: Client,
    config: SourceConfig,
}

impl HttpTimetableSource {
    pub fn new(config: SourceConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TimetableSource for HttpTimetableSource {
    async fn fetch_all(&self) -> Result<AllResponse, AppError> {
        let url = self.config.all_url();
        debug!("fetching timetable from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Timetable API error {}: {}", status, body)));
        }

        let body_text = response.text().await?;
        serde_json::from_str::<AllResponse>(&body_text).map_err(|e| {
            error!("Failed to parse timetable payload: {}", e);
            AppError::Parse(e)
        })
    }
}

/// Serves a fixed payload. Used offline and in tests.
pub struct StaticTimetableSource {
    payload: AllResponse,
}

impl StaticTimetableSource {
    pub fn new(payload: AllResponse) -> Self {
        Self { payload }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, AppError> {
        Ok(Self::new(serde_json::from_value(value)?))
    }
}

#[async_trait]
impl TimetableSource for StaticTimetableSource {
    async fn fetch_all(&self) -> Result<AllResponse, AppError> {
        Ok(self.payload.clone())
    }
}
