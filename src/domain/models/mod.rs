pub mod auth;
pub mod blocked_slot;
pub mod booking;
pub mod pitch;
pub mod time_of_day;
pub mod user;
pub mod working_hours;
