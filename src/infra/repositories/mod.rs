pub mod sqlite_pitch_repo;
pub mod sqlite_working_hours_repo;
pub mod sqlite_blocked_slot_repo;
pub mod sqlite_booking_repo;

pub mod postgres_pitch_repo;
pub mod postgres_working_hours_repo;
pub mod postgres_blocked_slot_repo;
pub mod postgres_booking_repo;

use crate::error::{is_unique_violation, AppError};

/// Booking inserts treat the active-slot unique index as the final word on conflicts.
pub(crate) fn map_booking_insert_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict("Slot already booked".into())
    } else {
        AppError::Database(e)
    }
}
