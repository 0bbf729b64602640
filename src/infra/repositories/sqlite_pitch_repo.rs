use crate::domain::{models::pitch::{Pitch, PitchFilter}, ports::PitchRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqlitePitchRepo {
    pool: SqlitePool,
}

impl SqlitePitchRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PitchRepository for SqlitePitchRepo {
    async fn create(&self, pitch: &Pitch) -> Result<Pitch, AppError> {
        sqlx::query_as::<_, Pitch>(
            "INSERT INTO pitches (id, name, city, address, is_indoor, price_per_hour, open_time, close_time, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&pitch.id).bind(&pitch.name).bind(&pitch.city).bind(&pitch.address)
            .bind(pitch.is_indoor).bind(pitch.price_per_hour).bind(&pitch.open_time).bind(&pitch.close_time)
            .bind(pitch.created_at).bind(pitch.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pitch>, AppError> {
        sqlx::query_as::<_, Pitch>("SELECT * FROM pitches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &PitchFilter) -> Result<Vec<Pitch>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM pitches WHERE 1 = 1");
        if let Some(city) = &filter.city {
            qb.push(" AND city = ").push_bind(city.clone());
        }
        if let Some(is_indoor) = filter.is_indoor {
            qb.push(" AND is_indoor = ").push_bind(is_indoor);
        }
        qb.push(" ORDER BY name ASC");

        qb.build_query_as::<Pitch>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, pitch: &Pitch) -> Result<Pitch, AppError> {
        sqlx::query_as::<_, Pitch>(
            "UPDATE pitches SET name=?, city=?, address=?, is_indoor=?, price_per_hour=?, open_time=?, close_time=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&pitch.name).bind(&pitch.city).bind(&pitch.address).bind(pitch.is_indoor)
            .bind(pitch.price_per_hour).bind(&pitch.open_time).bind(&pitch.close_time).bind(pitch.updated_at)
            .bind(&pitch.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Pitch not found".into()))
    }
}
