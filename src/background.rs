use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use chrono_tz::Tz;
use tokio::time::sleep;
use tracing::{debug, error, info, info_span, warn, Instrument};
use crate::error::AppError;
use crate::state::AppState;

/// Periodically moves elapsed CONFIRMED bookings to COMPLETED.
pub async fn start_completion_sweeper(state: Arc<AppState>) {
    info!("Starting booking completion sweeper...");

    let interval = Duration::from_secs(state.config.completion_sweep_secs.max(1));

    loop {
        let span = info_span!("completion_sweep");
        async {
            match complete_elapsed_bookings(&state).await {
                Ok(0) => debug!("No bookings to complete"),
                Ok(count) => info!("Marked {} bookings as completed", count),
                Err(e) => error!("Completion sweep failed: {:?}", e),
            }
        }
            .instrument(span)
            .await;

        sleep(interval).await;
    }
}

/// One sweep pass. Pitch dates and times are local to the facility timezone.
pub async fn complete_elapsed_bookings(state: &AppState) -> Result<u64, AppError> {
    let tz: Tz = state.config.facility_timezone.parse().unwrap_or_else(|_| {
        warn!("Unknown FACILITY_TIMEZONE {}, falling back to UTC", state.config.facility_timezone);
        chrono_tz::UTC
    });

    let local_now = Utc::now().with_timezone(&tz);
    let today = local_now.date_naive();
    let now = local_now.format("%H:%M").to_string();

    state.booking_repo.complete_elapsed(today, &now).await
}
