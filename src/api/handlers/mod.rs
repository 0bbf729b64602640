pub mod blocked_slot;
pub mod booking;
pub mod booking_management;
pub mod health;
pub mod pitch;
pub mod working_hours;
