use crate::domain::{
    models::booking::{Booking, BookingFilter, BookingStatus},
    ports::BookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::map_booking_insert_error;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use chrono::{NaiveDate, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_free(&self, booking: &Booking) -> Result<Booking, AppError> {
        // SQLite runs a single statement under the database write lock, so the
        // NOT EXISTS probe and the insert cannot interleave with another writer.
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, pitch_id, date, start_time, end_time, duration_minutes, status, cancelled_at, cancelled_by, created_at, updated_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, NULL, NULL, ?, ?
             WHERE NOT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE pitch_id = ? AND date = ? AND status IN ('PENDING', 'CONFIRMED')
                   AND start_time < ? AND end_time > ?
             )
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.pitch_id).bind(booking.date)
            .bind(&booking.start_time).bind(&booking.end_time).bind(booking.duration_minutes).bind(&booking.status)
            .bind(booking.created_at).bind(booking.updated_at)
            .bind(&booking.pitch_id).bind(booking.date).bind(&booking.end_time).bind(&booking.start_time)
            .fetch_optional(&self.pool).await.map_err(map_booking_insert_error)?;

        created.ok_or(AppError::Conflict("Slot already booked".into()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_by_date(&self, pitch_id: &str, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE pitch_id = ? AND date = ? AND status IN ('PENDING', 'CONFIRMED') ORDER BY start_time ASC"
        ).bind(pitch_id).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY date DESC, start_time DESC")
            .bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM bookings WHERE 1 = 1");
        if let Some(pitch_id) = &filter.pitch_id {
            qb.push(" AND pitch_id = ").push_bind(pitch_id.clone());
        }
        if let Some(date) = filter.date {
            qb.push(" AND date = ").push_bind(date);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        qb.push(" ORDER BY date DESC, start_time ASC");

        qb.build_query_as::<Booking>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn transition(
        &self,
        id: &str,
        from: &[BookingStatus],
        to: BookingStatus,
        actor_id: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        if from.is_empty() {
            return Ok(None);
        }

        let now = Utc::now();
        let (cancelled_at, cancelled_by) = if to == BookingStatus::Cancelled {
            (Some(now), actor_id.map(str::to_string))
        } else {
            (None, None)
        };

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE bookings SET status = ");
        qb.push_bind(to.as_str())
            .push(", updated_at = ").push_bind(now)
            .push(", cancelled_at = COALESCE(").push_bind(cancelled_at).push(", cancelled_at)")
            .push(", cancelled_by = COALESCE(").push_bind(cancelled_by).push(", cancelled_by)")
            .push(" WHERE id = ").push_bind(id.to_string())
            .push(" AND status IN (");
        let mut statuses = qb.separated(", ");
        for status in from {
            statuses.push_bind(status.as_str());
        }
        statuses.push_unseparated(") RETURNING *");

        qb.build_query_as::<Booking>().fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn complete_elapsed(&self, today: NaiveDate, now: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'COMPLETED', updated_at = ?
             WHERE status = 'CONFIRMED' AND (date < ? OR (date = ? AND end_time <= ?))"
        )
            .bind(Utc::now()).bind(today).bind(today).bind(now)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
