use crate::domain::{models::working_hours::WorkingHoursOverride, ports::WorkingHoursRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresWorkingHoursRepo {
    pool: PgPool,
}

impl PostgresWorkingHoursRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl WorkingHoursRepository for PostgresWorkingHoursRepo {
    async fn upsert(&self, entity: &WorkingHoursOverride) -> Result<WorkingHoursOverride, AppError> {
        sqlx::query_as::<_, WorkingHoursOverride>(
            r#"INSERT INTO pitch_working_hours (id, pitch_id, day_of_week, open_time, close_time, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (pitch_id, day_of_week) DO UPDATE SET
               open_time = EXCLUDED.open_time,
               close_time = EXCLUDED.close_time,
               updated_at = EXCLUDED.updated_at
               RETURNING *"#
        )
            .bind(&entity.id)
            .bind(&entity.pitch_id)
            .bind(entity.day_of_week)
            .bind(&entity.open_time)
            .bind(&entity.close_time)
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_for_day(&self, pitch_id: &str, day_of_week: i32) -> Result<Option<WorkingHoursOverride>, AppError> {
        sqlx::query_as::<_, WorkingHoursOverride>("SELECT * FROM pitch_working_hours WHERE pitch_id = $1 AND day_of_week = $2")
            .bind(pitch_id)
            .bind(day_of_week)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_pitch(&self, pitch_id: &str) -> Result<Vec<WorkingHoursOverride>, AppError> {
        sqlx::query_as::<_, WorkingHoursOverride>("SELECT * FROM pitch_working_hours WHERE pitch_id = $1 ORDER BY day_of_week ASC")
            .bind(pitch_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, pitch_id: &str, day_of_week: i32) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM pitch_working_hours WHERE pitch_id = $1 AND day_of_week = $2")
            .bind(pitch_id)
            .bind(day_of_week)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Working-hours override not found".into()));
        }
        Ok(())
    }
}
