//! Append-only signal log. Rows are never updated or deleted; the migration
//! installs a trigger that rejects both.

use chrono::{DateTime, Utc};
use scout_core::{Signal, SignalSource, SignalType};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SignalRow {
    pub id: i64,
    pub public_id: Uuid,
    pub app_id: i64,
    pub source: String,
    pub signal_type: String,
    pub url: Option<String>,
    pub text: String,
    pub confidence: f64,
    pub matched_keywords: Json<Vec<String>>,
    pub intent_strength: i16,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SignalRow {
    /// Convert to engine input. Unknown stored types become `other`.
    #[must_use]
    pub fn to_signal(&self) -> Signal {
        Signal {
            app_id: self.app_id,
            source: SignalSource::parse_lossy(&self.source),
            signal_type: SignalType::from_stored(&self.signal_type),
            text: self.text.clone(),
            confidence: self.confidence,
            published_at: self.published_at,
            created_at: self.created_at,
        }
    }
}

pub struct NewSignal<'a> {
    pub app_id: i64,
    pub source: &'a str,
    pub signal_type: SignalType,
    pub url: Option<&'a str>,
    pub text: &'a str,
    pub confidence: f64,
    pub matched_keywords: &'a [&'a str],
    pub intent_strength: i16,
    pub published_at: Option<DateTime<Utc>>,
}

const SIGNAL_COLUMNS: &str = "id, public_id, app_id, source, signal_type, url, text, confidence, \
     matched_keywords, intent_strength, published_at, created_at";

/// Append a signal. Returns `None` when a signal with the same
/// (`source`, `url`) already exists; signals without a URL are never deduplicated.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including an unknown `app_id`).
pub async fn insert_signal<'e, E>(
    executor: E,
    signal: &NewSignal<'_>,
) -> Result<Option<SignalRow>, DbError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, SignalRow>(&format!(
        "INSERT INTO signals \
           (app_id, source, signal_type, url, text, confidence, matched_keywords, \
            intent_strength, published_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (source, url) WHERE url IS NOT NULL DO NOTHING \
         RETURNING {SIGNAL_COLUMNS}"
    ))
    .bind(signal.app_id)
    .bind(signal.source)
    .bind(signal.signal_type.as_str())
    .bind(signal.url)
    .bind(signal.text)
    .bind(signal.confidence)
    .bind(Json(signal.matched_keywords))
    .bind(signal.intent_strength)
    .bind(signal.published_at)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Signals for one game, newest first by publication (or ingestion) time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_signals_for_game(
    pool: &PgPool,
    app_id: i64,
    limit: i64,
) -> Result<Vec<SignalRow>, DbError> {
    let rows = sqlx::query_as::<_, SignalRow>(&format!(
        "SELECT {SIGNAL_COLUMNS} FROM signals \
         WHERE app_id = $1 \
         ORDER BY COALESCE(published_at, created_at) DESC, id DESC \
         LIMIT $2"
    ))
    .bind(app_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every signal for a batch of games, grouped by `app_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_signals_for_games(
    pool: &PgPool,
    app_ids: &[i64],
) -> Result<Vec<SignalRow>, DbError> {
    let rows = sqlx::query_as::<_, SignalRow>(&format!(
        "SELECT {SIGNAL_COLUMNS} FROM signals \
         WHERE app_id = ANY($1) \
         ORDER BY app_id, id"
    ))
    .bind(app_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
