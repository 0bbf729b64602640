use crate::domain::{models::blocked_slot::BlockedSlot, ports::BlockedSlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteBlockedSlotRepo {
    pool: SqlitePool,
}

impl SqliteBlockedSlotRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl BlockedSlotRepository for SqliteBlockedSlotRepo {
    async fn create(&self, slot: &BlockedSlot) -> Result<BlockedSlot, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "INSERT INTO blocked_slots (id, pitch_id, date, start_time, end_time, reason, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&slot.id).bind(&slot.pitch_id).bind(slot.date).bind(&slot.start_time)
            .bind(&slot.end_time).bind(&slot.reason).bind(&slot.created_by).bind(slot.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, pitch_id: &str, date: NaiveDate) -> Result<Vec<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE pitch_id = ? AND date = ? ORDER BY start_time ASC"
        )
            .bind(pitch_id).bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_from(&self, pitch_id: &str, from: NaiveDate) -> Result<Vec<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE pitch_id = ? AND date >= ? ORDER BY date ASC, start_time ASC"
        )
            .bind(pitch_id).bind(from)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blocked_slots WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Blocked slot not found".into())); }
        Ok(())
    }
}
