use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable::api::router;
use timetable::config::AppConfig;
use timetable::preferences::SqlitePreferenceStore;
use timetable::source::HttpTimetableSource;
use timetable::state::AppState;
use timetable::theme::Viewport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "timetable=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let preferences = Arc::new(SqlitePreferenceStore::connect(&config.database_url).await?);
    let source = Arc::new(HttpTimetableSource::new(config.source.clone())?);

    let (state, platform_listener) =
        AppState::initialize(source, preferences, config.prefers_dark, Viewport::default()).await;
    tokio::spawn(platform_listener.start());

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
