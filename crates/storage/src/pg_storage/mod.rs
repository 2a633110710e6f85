//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

// Absolute paths in error handling are acceptable
#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod badges;
mod coach_sessions;
mod course;
mod daily_entries;
mod operating_systems;
mod patterns;
mod streaks;
mod weekly_plans;

use coach_core::{PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::pg_migrations::run_pg_migrations;
use crate::error::StorageError;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Decode a JSONB column. Malformed content is corruption, not an empty list.
pub(crate) fn decode_json<T: DeserializeOwned>(
    value: serde_json::Value,
    column: &str,
) -> Result<T, StorageError> {
    serde_json::from_value(value)
        .map_err(|e| StorageError::corrupt(format!("invalid JSON in column {column}"), e))
}

pub(crate) fn small_to_u8(value: i16, column: &str) -> Result<u8, StorageError> {
    u8::try_from(value)
        .map_err(|e| StorageError::corrupt(format!("{column} out of range: {value}"), e))
}

pub(crate) fn opt_small_to_u8(value: Option<i16>, column: &str) -> Result<Option<u8>, StorageError> {
    value.map(|v| small_to_u8(v, column)).transpose()
}

pub(crate) fn int_to_u32(value: i32, column: &str) -> Result<u32, StorageError> {
    u32::try_from(value)
        .map_err(|e| StorageError::corrupt(format!("{column} out of range: {value}"), e))
}

pub(crate) fn u32_to_int(value: u32, column: &str) -> Result<i32, StorageError> {
    i32::try_from(value)
        .map_err(|e| StorageError::corrupt(format!("{column} exceeds i32::MAX"), e))
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}
