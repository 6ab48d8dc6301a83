use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::json;
use timetable::error::AppError;
use timetable::source::{HttpTimetableSource, SourceConfig, TimetableSource};
use timetable::store::TimetableData;

/// Serves `app` on an ephemeral port and returns its base URL.
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test backend");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_fetch_all_from_backend() {
    let app = Router::new().route(
        "/api/all",
        get(|| async {
            Json(json!({
                "classes": [{ "key": "c1", "display": "1.A", "id": 10 }],
                "week": {
                    "week": 5,
                    "events": [{
                        "dayIndex": 1,
                        "periodIndex": 2,
                        "classKey": "c1",
                        "title": { "long": "Math", "short": "Ma" },
                        "flags": ["CANCELED"]
                    }],
                    "hourOffsets": [{ "startOffset": 0, "endOffset": 45 }]
                }
            }))
        }),
    );
    let base = spawn_backend(app).await;

    let source = HttpTimetableSource::new(SourceConfig::new(format!("{}/api/", base))).unwrap();
    let response = source.fetch_all().await.expect("fetch should succeed");
    let data = TimetableData::from_response(response);

    assert_eq!(data.week.week, 5);
    assert_eq!(data.grid.cell(1, 2).len(), 1);
    assert_eq!(data.directory.class_label("c1"), "1.A");
    assert_eq!(data.week.hour_offsets.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let app = Router::new().route(
        "/api/all",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = spawn_backend(app).await;

    let source = HttpTimetableSource::new(SourceConfig::new(format!("{}/api/", base))).unwrap();
    let result = source.fetch_all().await;

    assert!(matches!(result, Err(AppError::Upstream(msg)) if msg.contains("503")));
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let app = Router::new().route("/api/all", get(|| async { "<html>oops</html>" }));
    let base = spawn_backend(app).await;

    let source = HttpTimetableSource::new(SourceConfig::new(format!("{}/api/", base))).unwrap();
    let result = source.fetch_all().await;

    assert!(matches!(result, Err(AppError::Parse(_))));
}
