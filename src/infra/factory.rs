use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{BlockedSlotRepository, BookingRepository, PitchRepository, WorkingHoursRepository};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::booking_service::BookingService;
use crate::infra::repositories::{
    postgres_pitch_repo::PostgresPitchRepo, postgres_working_hours_repo::PostgresWorkingHoursRepo,
    postgres_blocked_slot_repo::PostgresBlockedSlotRepo, postgres_booking_repo::PostgresBookingRepo,
    sqlite_pitch_repo::SqlitePitchRepo, sqlite_working_hours_repo::SqliteWorkingHoursRepo,
    sqlite_blocked_slot_repo::SqliteBlockedSlotRepo, sqlite_booking_repo::SqliteBookingRepo,
};

/// Wires repositories and services into the shared state. Used by `run()` and by tests.
pub fn assemble_state(
    config: &Config,
    pitch_repo: Arc<dyn PitchRepository>,
    working_hours_repo: Arc<dyn WorkingHoursRepository>,
    blocked_slot_repo: Arc<dyn BlockedSlotRepository>,
    booking_repo: Arc<dyn BookingRepository>,
) -> AppState {
    let booking_service = Arc::new(BookingService::new(
        pitch_repo.clone(),
        working_hours_repo.clone(),
        blocked_slot_repo.clone(),
        booking_repo.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(config.clone()));

    AppState {
        config: config.clone(),
        pitch_repo,
        working_hours_repo,
        blocked_slot_repo,
        booking_repo,
        booking_service,
        auth_service,
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    assemble_state(
        config,
        Arc::new(SqlitePitchRepo::new(pool.clone())),
        Arc::new(SqliteWorkingHoursRepo::new(pool.clone())),
        Arc::new(SqliteBlockedSlotRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool)),
    )
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    assemble_state(
        config,
        Arc::new(PostgresPitchRepo::new(pool.clone())),
        Arc::new(PostgresWorkingHoursRepo::new(pool.clone())),
        Arc::new(PostgresBlockedSlotRepo::new(pool.clone())),
        Arc::new(PostgresBookingRepo::new(pool)),
    )
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_state(config, pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_state(config, pool)
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
