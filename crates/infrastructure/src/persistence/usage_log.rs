//! SQLite usage log implementation
//!
//! Implements the `UsageStorePort` using sqlx. The table is append-only;
//! aggregation and retention live in external tooling that reads the same
//! database file.

use application::{error::ApplicationError, ports::UsageStorePort};
use async_trait::async_trait;
use domain::UsageRecord;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::map_sqlx_error;

/// SQLite-based usage record store
#[derive(Debug, Clone)]
pub struct SqliteUsageLog {
    pool: SqlitePool,
}

impl SqliteUsageLog {
    /// Create a new SQLite usage log
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageStorePort for SqliteUsageLog {
    #[instrument(skip(self, record), fields(id = %record.id, cache_hit = record.cache_hit))]
    async fn insert(&self, record: UsageRecord) -> Result<(), ApplicationError> {
        sqlx::query(
            "INSERT INTO usage_logs (id, user_id, input_text, output_text, \
             language_from, language_to, stt_engine, llm_engine, tts_engine, \
             latency_ms, cost_estimated, cache_hit, served_by_challenger, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.as_ref().map(|u| u.as_str().to_string()))
        .bind(&record.input_text)
        .bind(&record.output_text)
        .bind(record.languages.from.as_str())
        .bind(record.languages.to.as_str())
        .bind(record.stt_engine.map(|e| e.as_str()))
        .bind(record.llm_engine.map(|e| e.as_str()))
        .bind(record.tts_engine.map(|e| e.as_str()))
        .bind(i64::try_from(record.latency_ms).unwrap_or(i64::MAX))
        .bind(record.cost_estimated)
        .bind(i32::from(record.cache_hit))
        .bind(i32::from(record.served_by_challenger))
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("Recorded usage transaction");
        Ok(())
    }
}
