//! Analyst action log per game.

use chrono::{DateTime, Utc};
use scout_core::DealActionType;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DealActionRow {
    pub id: i64,
    pub public_id: Uuid,
    pub app_id: i64,
    pub action_type: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Record an action against a game and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including an unknown `app_id`).
pub async fn insert_deal_action(
    pool: &PgPool,
    app_id: i64,
    action_type: DealActionType,
    payload: &serde_json::Value,
) -> Result<DealActionRow, DbError> {
    let row = sqlx::query_as::<_, DealActionRow>(
        "INSERT INTO deal_actions (app_id, action_type, payload) \
         VALUES ($1, $2, $3) \
         RETURNING id, public_id, app_id, action_type, payload, created_at",
    )
    .bind(app_id)
    .bind(action_type.as_str())
    .bind(payload)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Actions for one game, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_deal_actions(
    pool: &PgPool,
    app_id: i64,
    limit: i64,
) -> Result<Vec<DealActionRow>, DbError> {
    let rows = sqlx::query_as::<_, DealActionRow>(
        "SELECT id, public_id, app_id, action_type, payload, created_at \
         FROM deal_actions \
         WHERE app_id = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(app_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
