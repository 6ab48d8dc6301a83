pub mod api;
pub mod color;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod preferences;
pub mod services;
pub mod source;
pub mod state;
pub mod store;
pub mod theme;
