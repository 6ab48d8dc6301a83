use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::source::{DEFAULT_API_PATH, SourceConfig};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://timetable.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Platform dark preference at startup.
    pub prefers_dark: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_path = lookup("TIMETABLE_API_PATH").unwrap_or_else(|| DEFAULT_API_PATH.to_string());
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {:?} is invalid: {}", bind_addr, e)))?;

        let prefers_dark = lookup("TIMETABLE_PREFERS_DARK")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            source: SourceConfig::new(api_path),
            database_url,
            bind_addr,
            prefers_dark,
        })
    }
}
