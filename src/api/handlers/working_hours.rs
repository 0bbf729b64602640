use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::RequireAdmin, json::ApiJson};
use crate::api::dtos::requests::WorkingHoursRequest;
use crate::api::dtos::responses::DataResponse;
use crate::domain::models::time_of_day::parse_time_range;
use crate::domain::models::working_hours::WorkingHoursOverride;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn parse_day_of_week(day: i32) -> Result<i32, AppError> {
    if !(0..=6).contains(&day) {
        return Err(AppError::Validation("dayOfWeek must be between 0 (Sunday) and 6 (Saturday)".into()));
    }
    Ok(day)
}

pub async fn upsert_working_hours(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(pitch_id): Path<String>,
    ApiJson(payload): ApiJson<WorkingHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    let day_of_week = parse_day_of_week(payload.day_of_week)?;
    let range = parse_time_range(&payload.open_time, &payload.close_time)?;

    let pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;

    let entity = WorkingHoursOverride::new(pitch.id, day_of_week, range.start.to_string(), range.end.to_string());

    let saved = state.working_hours_repo.upsert(&entity).await?;
    info!("Upserted working hours for pitch {} on day {} ({}-{}) by {}",
        saved.pitch_id, saved.day_of_week, saved.open_time, saved.close_time, admin.id);
    Ok(Json(DataResponse::new(saved)))
}

pub async fn list_working_hours(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Path(pitch_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;

    let overrides = state.working_hours_repo.list_by_pitch(&pitch.id).await?;
    Ok(Json(DataResponse::new(overrides)))
}

pub async fn delete_working_hours(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path((pitch_id, day)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let day_of_week = day.parse::<i32>()
        .map_err(|_| AppError::Validation("dayOfWeek must be a number".into()))
        .and_then(parse_day_of_week)?;

    state.working_hours_repo.delete(&pitch_id, day_of_week).await?;
    info!("Deleted working hours for pitch {} on day {} by {}", pitch_id, day_of_week, admin.id);
    Ok(Json(DataResponse::new(serde_json::json!({ "pitchId": pitch_id, "dayOfWeek": day_of_week, "deleted": true }))))
}
