use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, patch, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, pitch, booking, booking_management, working_hours, blocked_slot};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Pitches & availability
        .route("/pitches", get(pitch::list_pitches))
        .route("/pitches/{id}", get(pitch::get_pitch))
        .route("/pitches/{id}/availability", get(pitch::get_availability))

        // Bookings
        .route("/bookings", post(booking::create_booking))
        .route("/bookings/me", get(booking::list_my_bookings))
        .route("/bookings/{id}", get(booking::get_booking))
        .route("/bookings/{id}/cancel", patch(booking::cancel_booking))

        // Admin: pitch registry
        .route("/admin/pitches", post(pitch::create_pitch))
        .route("/admin/pitches/{id}", put(pitch::update_pitch))

        // Admin: working hours & blocks
        .route("/admin/pitches/{id}/working-hours", patch(working_hours::upsert_working_hours).get(working_hours::list_working_hours))
        .route("/admin/pitches/{id}/working-hours/{day_of_week}", delete(working_hours::delete_working_hours))
        .route("/admin/pitches/{id}/block-slot", post(blocked_slot::create_blocked_slot))
        .route("/admin/pitches/{id}/blocked-slots", get(blocked_slot::list_blocked_slots))
        .route("/admin/blocked-slots/{id}", delete(blocked_slot::delete_blocked_slot))

        // Admin: booking lifecycle
        .route("/admin/bookings", get(booking_management::list_bookings))
        .route("/admin/bookings/{id}/confirm", patch(booking_management::confirm_booking))
        .route("/admin/bookings/{id}/complete", patch(booking_management::complete_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
