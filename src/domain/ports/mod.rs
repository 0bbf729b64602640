use crate::domain::models::{
    pitch::{Pitch, PitchFilter},
    working_hours::WorkingHoursOverride,
    blocked_slot::BlockedSlot,
    booking::{Booking, BookingFilter, BookingStatus},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait PitchRepository: Send + Sync {
    async fn create(&self, pitch: &Pitch) -> Result<Pitch, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Pitch>, AppError>;
    async fn list(&self, filter: &PitchFilter) -> Result<Vec<Pitch>, AppError>;
    async fn update(&self, pitch: &Pitch) -> Result<Pitch, AppError>;
}

#[async_trait]
pub trait WorkingHoursRepository: Send + Sync {
    /// Inserts or replaces the single override for (pitch, day_of_week).
    async fn upsert(&self, entity: &WorkingHoursOverride) -> Result<WorkingHoursOverride, AppError>;
    async fn find_for_day(&self, pitch_id: &str, day_of_week: i32) -> Result<Option<WorkingHoursOverride>, AppError>;
    async fn list_by_pitch(&self, pitch_id: &str) -> Result<Vec<WorkingHoursOverride>, AppError>;
    async fn delete(&self, pitch_id: &str, day_of_week: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait BlockedSlotRepository: Send + Sync {
    async fn create(&self, slot: &BlockedSlot) -> Result<BlockedSlot, AppError>;
    async fn list_by_date(&self, pitch_id: &str, date: NaiveDate) -> Result<Vec<BlockedSlot>, AppError>;
    async fn list_from(&self, pitch_id: &str, from: NaiveDate) -> Result<Vec<BlockedSlot>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking only if no active booking on the same pitch and
    /// date overlaps it. The overlap test and the insert are atomic with
    /// respect to other writers; losing a race yields `AppError::Conflict`.
    async fn create_if_free(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_active_by_date(&self, pitch_id: &str, date: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    /// Conditional status update. Returns `None` when the booking does not
    /// exist or its current status is not in `from`.
    async fn transition(
        &self,
        id: &str,
        from: &[BookingStatus],
        to: BookingStatus,
        actor_id: Option<&str>,
    ) -> Result<Option<Booking>, AppError>;
    /// Marks CONFIRMED bookings ending at or before (`today`, `now`) as COMPLETED.
    async fn complete_elapsed(&self, today: NaiveDate, now: &str) -> Result<u64, AppError>;
}
