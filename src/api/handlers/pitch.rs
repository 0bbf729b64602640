use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::RequireAdmin, json::ApiJson};
use crate::api::dtos::requests::{CreatePitchRequest, UpdatePitchRequest};
use crate::api::dtos::responses::DataResponse;
use crate::domain::models::pitch::{NewPitchParams, Pitch, PitchFilter};
use crate::domain::models::time_of_day::{parse_date, parse_end_time, parse_start_time};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_pitch(pitch: &Pitch) -> Result<(), AppError> {
    require_text("name", &pitch.name)?;
    require_text("city", &pitch.city)?;
    require_text("address", &pitch.address)?;

    if !pitch.price_per_hour.is_finite() || pitch.price_per_hour < 0.0 {
        return Err(AppError::Validation("pricePerHour must be a non-negative number".into()));
    }

    let open = pitch.open_time.as_deref().map(parse_start_time).transpose()?;
    let close = pitch.close_time.as_deref().map(parse_end_time).transpose()?;
    if let (Some(open), Some(close)) = (open, close)
        && open >= close {
        return Err(AppError::Validation("openTime must be before closeTime".into()));
    }
    Ok(())
}

pub async fn list_pitches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let is_indoor = match params.get("isIndoor").map(String::as_str) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return Err(AppError::Validation("isIndoor must be true or false".into())),
    };

    let filter = PitchFilter {
        city: params.get("city").cloned(),
        is_indoor,
    };

    let pitches = state.pitch_repo.list(&filter).await?;
    Ok(Json(DataResponse::new(pitches)))
}

pub async fn get_pitch(
    State(state): State<Arc<AppState>>,
    Path(pitch_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;
    Ok(Json(DataResponse::new(pitch)))
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(pitch_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("date query parameter is required".into()))?;
    let date = parse_date(date_str)?;

    let availability = state.booking_service.availability(&pitch_id, date).await?;
    Ok(Json(DataResponse::new(availability)))
}

pub async fn create_pitch(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(payload): ApiJson<CreatePitchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pitch = Pitch::new(NewPitchParams {
        name: payload.name,
        city: payload.city,
        address: payload.address,
        is_indoor: payload.is_indoor.unwrap_or(false),
        price_per_hour: payload.price_per_hour,
        open_time: payload.open_time,
        close_time: payload.close_time,
    });
    validate_pitch(&pitch)?;

    let created = state.pitch_repo.create(&pitch).await?;
    info!("Pitch created: {} by {}", created.id, admin.id);
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn update_pitch(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(pitch_id): Path<String>,
    ApiJson(payload): ApiJson<UpdatePitchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut pitch = state.pitch_repo.find_by_id(&pitch_id).await?
        .ok_or(AppError::NotFound("Pitch not found".into()))?;

    if let Some(name) = payload.name { pitch.name = name; }
    if let Some(city) = payload.city { pitch.city = city; }
    if let Some(address) = payload.address { pitch.address = address; }
    if let Some(is_indoor) = payload.is_indoor { pitch.is_indoor = is_indoor; }
    if let Some(price) = payload.price_per_hour { pitch.price_per_hour = price; }

    // Empty string clears the default so the hard-coded fallback applies.
    if let Some(open) = payload.open_time {
        pitch.open_time = if open.is_empty() { None } else { Some(open) };
    }
    if let Some(close) = payload.close_time {
        pitch.close_time = if close.is_empty() { None } else { Some(close) };
    }
    pitch.updated_at = Utc::now();
    validate_pitch(&pitch)?;

    let updated = state.pitch_repo.update(&pitch).await?;
    info!("Pitch updated: {} by {}", updated.id, admin.id);
    Ok(Json(DataResponse::new(updated)))
}
