use std::sync::Arc;
use crate::domain::ports::{
    BlockedSlotRepository, BookingRepository, PitchRepository, WorkingHoursRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::booking_service::BookingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pitch_repo: Arc<dyn PitchRepository>,
    pub working_hours_repo: Arc<dyn WorkingHoursRepository>,
    pub blocked_slot_repo: Arc<dyn BlockedSlotRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
    pub auth_service: Arc<AuthService>,
}
