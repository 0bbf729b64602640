use crate::domain::{models::pitch::{Pitch, PitchFilter}, ports::PitchRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresPitchRepo {
    pool: PgPool,
}

impl PostgresPitchRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PitchRepository for PostgresPitchRepo {
    async fn create(&self, pitch: &Pitch) -> Result<Pitch, AppError> {
        sqlx::query_as::<_, Pitch>("INSERT INTO pitches (id, name, city, address, is_indoor, price_per_hour, open_time, close_time, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *").bind(&pitch.id).bind(&pitch.name).bind(&pitch.city).bind(&pitch.address).bind(pitch.is_indoor).bind(pitch.price_per_hour).bind(&pitch.open_time).bind(&pitch.close_time).bind(pitch.created_at).bind(pitch.updated_at).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Pitch>, AppError> {
        sqlx::query_as::<_, Pitch>("SELECT * FROM pitches WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, filter: &PitchFilter) -> Result<Vec<Pitch>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM pitches WHERE TRUE");
        if let Some(city) = &filter.city {
            qb.push(" AND city = ").push_bind(city.clone());
        }
        if let Some(is_indoor) = filter.is_indoor {
            qb.push(" AND is_indoor = ").push_bind(is_indoor);
        }
        qb.push(" ORDER BY name ASC");
        qb.build_query_as::<Pitch>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, pitch: &Pitch) -> Result<Pitch, AppError> {
        sqlx::query_as::<_, Pitch>("UPDATE pitches SET name=$1, city=$2, address=$3, is_indoor=$4, price_per_hour=$5, open_time=$6, close_time=$7, updated_at=$8 WHERE id=$9 RETURNING *").bind(&pitch.name).bind(&pitch.city).bind(&pitch.address).bind(pitch.is_indoor).bind(pitch.price_per_hour).bind(&pitch.open_time).bind(&pitch.close_time).bind(pitch.updated_at).bind(&pitch.id).fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Pitch not found".into()))
    }
}
