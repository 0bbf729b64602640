use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::RequireAdmin, json::ApiJson};
use crate::api::dtos::requests::BlockSlotRequest;
use crate::api::dtos::responses::{DataResponse, DeletedResponse};
use crate::domain::models::blocked_slot::{BlockedSlot, NewBlockedSlotParams};
use crate::domain::models::time_of_day::{parse_date, parse_time_range};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_blocked_slot(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(pitch_id): Path<String>,
    ApiJson(payload): ApiJson<BlockSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let range = parse_time_range(&payload.start_time, &payload.end_time)?;

    let pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;

    let slot = BlockedSlot::new(NewBlockedSlotParams {
        pitch_id: pitch.id,
        date,
        range,
        reason: payload.reason.filter(|r| !r.trim().is_empty()),
        created_by: Some(admin.id.clone()),
    });

    let created = state.blocked_slot_repo.create(&slot).await?;
    info!("Blocked {} {}-{} on pitch {} by {}", created.date, created.start_time, created.end_time, created.pitch_id, admin.id);
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn list_blocked_slots(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Path(pitch_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;

    let slots = match params.get("date") {
        Some(date_str) => state.blocked_slot_repo.list_by_date(&pitch.id, parse_date(date_str)?).await?,
        None => state.blocked_slot_repo.list_from(&pitch.id, Utc::now().date_naive()).await?,
    };
    Ok(Json(DataResponse::new(slots)))
}

pub async fn delete_blocked_slot(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.blocked_slot_repo.delete(&slot_id).await?;
    info!("Deleted blocked slot {} by {}", slot_id, admin.id);
    Ok(Json(DataResponse::new(DeletedResponse { id: slot_id, deleted: true })))
}
