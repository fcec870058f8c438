// src/services/store.rs
use std::fmt::Debug;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::message::{Movie, RecommendationRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("could not encode movies: {0}")]
    Encode(serde_json::Error),
    #[error("record {id} is corrupt: {reason}")]
    CorruptRecord { id: i64, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(sqlx::FromRow)]
struct RecommendationRow {
    id: i64,
    user_input: String,
    recommended_movies: String,
    timestamp: String,
}

impl TryFrom<RecommendationRow> for RecommendationRecord {
    type Error = StoreError;

    fn try_from(row: RecommendationRow) -> StoreResult<Self> {
        let recommendations: Vec<Movie> = serde_json::from_str(&row.recommended_movies)
            .map_err(|e| StoreError::CorruptRecord {
                id: row.id,
                reason: e.to_string(),
            })?;
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| StoreError::CorruptRecord {
                id: row.id,
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(RecommendationRecord {
            id: row.id,
            user_input: row.user_input,
            recommendations,
            timestamp,
        })
    }
}

/// Append-only table of submissions. Records are never updated or deleted.
#[derive(Clone)]
pub struct RecommendationStore {
    pool: SqlitePool,
}

impl Debug for RecommendationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationStore")
            .field("connections", &self.pool.size())
            .finish()
    }
}

impl RecommendationStore {
    /// Open (creating if missing) the database at `url` and make sure the table exists.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("Database initialized at {}", url);
        Ok(store)
    }

    /// A private in-memory database. One connection, kept open for the life of the pool,
    /// since every new sqlite memory connection starts empty.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Persist one submission and return it exactly as history will read it back.
    pub async fn insert(&self, user_input: &str, movies: &[Movie]) -> StoreResult<RecommendationRecord> {
        let encoded = serde_json::to_string(movies).map_err(StoreError::Encode)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            "INSERT INTO recommendations (user_input, recommended_movies, timestamp) VALUES (?, ?, ?)",
        )
        .bind(user_input)
        .bind(&encoded)
        .bind(&timestamp)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, count = movies.len(), "stored recommendation");

        RecommendationRecord::try_from(RecommendationRow {
            id,
            user_input: user_input.to_string(),
            recommended_movies: encoded,
            timestamp,
        })
    }

    /// Every stored record, newest first.
    pub async fn list_recent(&self) -> StoreResult<Vec<RecommendationRecord>> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            "SELECT id, user_input, recommended_movies, timestamp FROM recommendations
             ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RecommendationRecord::try_from).collect()
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
