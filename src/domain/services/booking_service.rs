use std::collections::HashMap;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;
use crate::domain::models::booking::{
    check_transition, Booking, BookingStatus, BookingWithPitch, NewBookingParams,
    DEFAULT_DURATION_MINUTES, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
use crate::domain::models::pitch::Pitch;
use crate::domain::models::time_of_day::{parse_date, parse_start_time, TimeRange};
use crate::domain::models::user::CurrentUser;
use crate::domain::ports::{BlockedSlotRepository, BookingRepository, PitchRepository, WorkingHoursRepository};
use crate::domain::services::availability::{calculate_availability, check_bookable, day_of_week, resolve_hours, Availability};
use crate::error::AppError;

/// Raw booking request as received from a client.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub pitch_id: String,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub pitch_id: String,
    pub date: NaiveDate,
    pub range: TimeRange,
}

/// Format and range checks. Runs before any storage access.
pub fn validate_booking_request(req: &BookingRequest) -> Result<ValidatedBooking, AppError> {
    Uuid::parse_str(&req.pitch_id)
        .map_err(|_| AppError::Validation("pitchId must be a UUID".into()))?;
    let date = parse_date(&req.date)?;
    let start = parse_start_time(&req.start_time)?;

    let duration = req.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
        return Err(AppError::Validation(format!(
            "durationMinutes must be between {} and {}",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        )));
    }

    let end = start.plus_minutes(duration as u32)
        .ok_or(AppError::Validation("Booking must end by midnight".into()))?;

    Ok(ValidatedBooking {
        pitch_id: req.pitch_id.clone(),
        date,
        range: TimeRange::new(start, end),
    })
}

pub struct BookingService {
    pitch_repo: Arc<dyn PitchRepository>,
    working_hours_repo: Arc<dyn WorkingHoursRepository>,
    blocked_slot_repo: Arc<dyn BlockedSlotRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        pitch_repo: Arc<dyn PitchRepository>,
        working_hours_repo: Arc<dyn WorkingHoursRepository>,
        blocked_slot_repo: Arc<dyn BlockedSlotRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { pitch_repo, working_hours_repo, blocked_slot_repo, booking_repo }
    }

    async fn require_pitch(&self, pitch_id: &str) -> Result<Pitch, AppError> {
        self.pitch_repo.find_by_id(pitch_id).await?
            .ok_or(AppError::NotFound("Pitch not found".into()))
    }

    pub async fn availability(&self, pitch_id: &str, date: NaiveDate) -> Result<Availability, AppError> {
        let pitch = self.require_pitch(pitch_id).await?;

        let override_rule = self.working_hours_repo.find_for_day(&pitch.id, day_of_week(date)).await?;
        let blocks = self.blocked_slot_repo.list_by_date(&pitch.id, date).await?;
        let bookings = self.booking_repo.list_active_by_date(&pitch.id, date).await?;

        Ok(calculate_availability(&pitch, date, override_rule.as_ref(), &blocks, &bookings))
    }

    /// Conflict guard. The pre-checks mirror the read path; the repository's
    /// conditional insert is what actually decides a race.
    pub async fn create_booking(&self, user: &CurrentUser, req: BookingRequest) -> Result<(Booking, Pitch), AppError> {
        let validated = validate_booking_request(&req)?;
        let pitch = self.require_pitch(&validated.pitch_id).await?;

        let override_rule = self.working_hours_repo.find_for_day(&pitch.id, day_of_week(validated.date)).await?;
        let hours = resolve_hours(&pitch, validated.date, override_rule.as_ref());
        let blocks = self.blocked_slot_repo.list_by_date(&pitch.id, validated.date).await?;
        let bookings = self.booking_repo.list_active_by_date(&pitch.id, validated.date).await?;

        if let Err(e) = check_bookable(hours, validated.range, validated.date, &blocks, &bookings) {
            warn!(
                "Booking rejected for pitch {} on {} at {}: {}",
                pitch.id, validated.date, validated.range.start, e
            );
            return Err(e);
        }

        let booking = Booking::new(NewBookingParams {
            user_id: user.id.clone(),
            pitch_id: pitch.id.clone(),
            date: validated.date,
            range: validated.range,
        });

        let created = match self.booking_repo.create_if_free(&booking).await {
            Ok(created) => created,
            Err(AppError::Conflict(msg)) => {
                warn!("Booking lost race for pitch {} on {} at {}", pitch.id, validated.date, validated.range.start);
                return Err(AppError::Conflict(msg));
            }
            Err(e) => return Err(e),
        };

        info!("Booking confirmed: {} on pitch {} ({} {}-{})",
            created.id, pitch.id, created.date, created.start_time, created.end_time);
        Ok((created, pitch))
    }

    pub async fn get_booking(&self, actor: &CurrentUser, booking_id: &str) -> Result<BookingWithPitch, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if !actor.can_manage(&booking.user_id) {
            return Err(AppError::Forbidden("Not the owner of this booking".into()));
        }

        let pitch = self.pitch_repo.find_by_id(&booking.pitch_id).await?;
        Ok(BookingWithPitch { booking, pitch })
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingWithPitch>, AppError> {
        let bookings = self.booking_repo.list_by_user(user_id).await?;
        self.attach_pitches(bookings).await
    }

    pub async fn attach_pitches(&self, bookings: Vec<Booking>) -> Result<Vec<BookingWithPitch>, AppError> {
        let mut pitches: HashMap<String, Option<Pitch>> = HashMap::new();
        let mut joined = Vec::with_capacity(bookings.len());

        for booking in bookings {
            if !pitches.contains_key(&booking.pitch_id) {
                let pitch = self.pitch_repo.find_by_id(&booking.pitch_id).await?;
                pitches.insert(booking.pitch_id.clone(), pitch);
            }
            let pitch = pitches.get(&booking.pitch_id).cloned().flatten();
            joined.push(BookingWithPitch { booking, pitch });
        }
        Ok(joined)
    }

    pub async fn cancel_booking(&self, actor: &CurrentUser, booking_id: &str) -> Result<Booking, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if !actor.can_manage(&booking.user_id) {
            return Err(AppError::Forbidden("Only the owner or an administrator can cancel this booking".into()));
        }

        let cancelled = self.apply_transition(booking, BookingStatus::Cancelled, Some(&actor.id)).await?;
        info!("Booking cancelled: {} by {}", cancelled.id, actor.id);
        Ok(cancelled)
    }

    pub async fn confirm_booking(&self, booking_id: &str) -> Result<Booking, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        self.apply_transition(booking, BookingStatus::Confirmed, None).await
    }

    pub async fn complete_booking(&self, booking_id: &str) -> Result<Booking, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        self.apply_transition(booking, BookingStatus::Completed, None).await
    }

    async fn apply_transition(&self, booking: Booking, to: BookingStatus, actor_id: Option<&str>) -> Result<Booking, AppError> {
        check_transition(booking.status()?, to)?;

        let from = BookingStatus::sources_of(to);
        if let Some(updated) = self.booking_repo.transition(&booking.id, &from, to, actor_id).await? {
            return Ok(updated);
        }

        // Someone else moved it between our read and the conditional update.
        let current = self.booking_repo.find_by_id(&booking.id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        check_transition(current.status()?, to)?;
        Err(AppError::InvalidStatus(format!("Booking {} changed status concurrently", booking.id)))
    }
}
