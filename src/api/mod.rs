use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::color::HslColor;
use crate::error::AppError;
use crate::models::*;
use crate::preferences;
use crate::services::LoadStats;
use crate::state::AppState;
use crate::theme::{ColorMode, ColorScheme, Viewport};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridCell {
    day_index: u32,
    period_index: u32,
    events: Vec<Event>,
}

#[derive(Debug, Serialize)]
struct ColorResponse {
    key: String,
    hue: u16,
    color: HslColor,
    mode: ColorMode,
}

#[derive(Debug, Serialize)]
struct ThemeResponse {
    color: ColorScheme,
    effective: ColorMode,
}

#[derive(Debug, Deserialize)]
struct SetThemeRequest {
    color: ColorScheme,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrefersDarkRequest {
    prefers_dark: bool,
}

#[derive(Debug, Serialize)]
struct LocaleResponse {
    locale: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/teachers", get(list_teachers))
        .route("/teachers/{key}", get(get_teacher))
        .route("/rooms", get(list_rooms))
        .route("/rooms/{key}", get(get_room))
        .route("/classes", get(list_classes))
        .route("/classes/{key}", get(get_class))
        .route("/week", get(current_week))
        .route("/events", get(list_events))
        .route("/events/{day}/{period}", get(cell_events))
        .route("/colors/{key}", get(color_for_key))
        .route("/theme", get(get_theme).put(set_theme))
        .route("/platform/prefers-dark", put(platform_prefers_dark))
        .route("/platform/viewport", put(platform_viewport))
        .route("/viewport", get(get_viewport))
        .route("/locale", get(get_locale))
        .route("/reload", post(reload))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into the crate's JSON
/// error shape.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_teachers(State(state): State<AppState>) -> Json<Vec<Teacher>> {
    let data = state.data.read().await;
    Json(data.directory.sorted_teachers().into_iter().cloned().collect())
}

async fn get_teacher(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    let data = state.data.read().await;
    let teacher = data.directory.teacher(&key).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(teacher))
}

async fn list_rooms(State(state): State<AppState>) -> Json<Vec<Room>> {
    let data = state.data.read().await;
    Json(data.directory.sorted_rooms().into_iter().cloned().collect())
}

async fn get_room(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Room>, AppError> {
    let data = state.data.read().await;
    let room = data.directory.room(&key).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(room))
}

async fn list_classes(State(state): State<AppState>) -> Json<Vec<Class>> {
    let data = state.data.read().await;
    Json(data.directory.sorted_classes().into_iter().cloned().collect())
}

async fn get_class(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Class>, AppError> {
    let data = state.data.read().await;
    let class = data.directory.class(&key).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(class))
}

async fn current_week(State(state): State<AppState>) -> Json<WeekContext> {
    Json(state.data.read().await.week.clone())
}

async fn list_events(State(state): State<AppState>) -> Json<Vec<GridCell>> {
    let data = state.data.read().await;
    let cells = data
        .grid
        .cells()
        .map(|(day_index, period_index, events)| GridCell {
            day_index,
            period_index,
            events: events.to_vec(),
        })
        .collect();
    Json(cells)
}

async fn cell_events(
    State(state): State<AppState>,
    Path((day, period)): Path<(u64, u64)>,
) -> Json<Vec<Event>> {
    // Indices past u32 can never hold events.
    let (Ok(day), Ok(period)) = (u32::try_from(day), u32::try_from(period)) else {
        return Json(Vec::new());
    };
    let data = state.data.read().await;
    Json(data.grid.cell(day, period).to_vec())
}

async fn color_for_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ColorResponse> {
    let mode = state.colors.mode();
    let color = crate::color::color_for(&key, mode);
    Json(ColorResponse {
        hue: color.hue,
        key,
        color,
        mode,
    })
}

async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let common = state.common.lock().await;
    Json(ThemeResponse {
        color: common.theme.color(),
        effective: common.theme.effective(),
    })
}

async fn set_theme(
    State(state): State<AppState>,
    payload: Result<Json<SetThemeRequest>, JsonRejection>,
) -> Result<Json<ThemeResponse>, AppError> {
    let req = json_body(payload)?;
    let mut common = state.common.lock().await;
    let effective = common.theme.set_color(req.color).await?;
    Ok(Json(ThemeResponse {
        color: common.theme.color(),
        effective,
    }))
}

async fn platform_prefers_dark(
    State(state): State<AppState>,
    payload: Result<Json<PrefersDarkRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = json_body(payload)?;
    state.platform.set_prefers_dark(req.prefers_dark);
    Ok(StatusCode::ACCEPTED)
}

async fn platform_viewport(
    State(state): State<AppState>,
    payload: Result<Json<Viewport>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let viewport = json_body(payload)?;
    state.platform.resize(viewport);
    Ok(StatusCode::ACCEPTED)
}

async fn get_viewport(State(state): State<AppState>) -> Json<Viewport> {
    Json(state.common.lock().await.viewport.current())
}

async fn get_locale(State(state): State<AppState>) -> Json<LocaleResponse> {
    let locale = preferences::locale(state.preferences.as_ref()).await;
    Json(LocaleResponse { locale })
}

async fn reload(State(state): State<AppState>) -> Result<Json<LoadStats>, AppError> {
    let (data, stats) = state.loader.load().await?;
    *state.data.write().await = data;
    Ok(Json(stats))
}
