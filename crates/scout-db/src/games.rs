//! Database operations for the `games` table.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use scout_core::GameFacts;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `games` table. Cached scores stay `NULL` until first scored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameRow {
    pub app_id: i64,
    pub steam_name: String,
    pub steam_url: String,
    pub developer_name: Option<String>,
    pub stage: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub publishers: Option<Json<Vec<String>>>,
    pub has_demo: bool,
    pub price_eur: Option<Decimal>,
    pub total_reviews: Option<i64>,
    pub recent_reviews_30d: Option<i64>,
    pub positive_ratio: Option<f64>,
    pub intent_score: Option<i32>,
    pub quality_score: Option<i32>,
    pub intent_reasons: Option<serde_json::Value>,
    pub quality_reasons: Option<serde_json::Value>,
    pub scored_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameRow {
    /// Convert to engine input. An unrecognised stage string becomes `None`.
    #[must_use]
    pub fn to_facts(&self) -> GameFacts {
        GameFacts {
            app_id: self.app_id,
            steam_name: Some(self.steam_name.clone()),
            stage: self.stage.as_deref().and_then(|s| s.parse().ok()),
            release_date: self.release_date,
            publishers: self.publishers.as_ref().map(|p| p.0.clone()),
            has_demo: self.has_demo,
            price_eur: self.price_eur.and_then(|p| p.to_f64()),
            total_reviews: self.total_reviews,
            recent_reviews_30d: self.recent_reviews_30d,
            positive_ratio: self.positive_ratio,
        }
    }
}

/// Storefront facts to upsert. Cached scores are written separately.
pub struct NewGame<'a> {
    pub facts: &'a GameFacts,
    pub steam_url: &'a str,
    pub developer_name: Option<&'a str>,
}

const GAME_COLUMNS: &str = "app_id, steam_name, steam_url, developer_name, stage, release_date, \
     publishers, has_demo, price_eur, total_reviews, recent_reviews_30d, positive_ratio, \
     intent_score, quality_score, intent_reasons, quality_reasons, scored_at, created_at, updated_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns one game by Steam app id, or `None` if it is not tracked.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_game(pool: &PgPool, app_id: i64) -> Result<Option<GameRow>, DbError> {
    let row = sqlx::query_as::<_, GameRow>(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE app_id = $1"
    ))
    .bind(app_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every tracked game, ordered by app id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_games(pool: &PgPool) -> Result<Vec<GameRow>, DbError> {
    let rows = sqlx::query_as::<_, GameRow>(&format!(
        "SELECT {GAME_COLUMNS} FROM games ORDER BY app_id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or refresh the storefront facts of a game. Cached scores are left
/// untouched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_game<'e, E>(executor: E, game: &NewGame<'_>) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
{
    let facts = game.facts;
    let price = facts
        .price_eur
        .and_then(Decimal::from_f64)
        .map(|p| p.round_dp(2));

    sqlx::query(
        "INSERT INTO games \
           (app_id, steam_name, steam_url, developer_name, stage, release_date, publishers, \
            has_demo, price_eur, total_reviews, recent_reviews_30d, positive_ratio) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (app_id) DO UPDATE SET \
           steam_name = EXCLUDED.steam_name, \
           steam_url = EXCLUDED.steam_url, \
           developer_name = EXCLUDED.developer_name, \
           stage = EXCLUDED.stage, \
           release_date = EXCLUDED.release_date, \
           publishers = EXCLUDED.publishers, \
           has_demo = EXCLUDED.has_demo, \
           price_eur = EXCLUDED.price_eur, \
           total_reviews = EXCLUDED.total_reviews, \
           recent_reviews_30d = EXCLUDED.recent_reviews_30d, \
           positive_ratio = EXCLUDED.positive_ratio, \
           updated_at = NOW()",
    )
    .bind(facts.app_id)
    .bind(facts.steam_name.as_deref().unwrap_or_default())
    .bind(game.steam_url)
    .bind(game.developer_name)
    .bind(facts.stage.map(|s| s.as_str()))
    .bind(facts.release_date)
    .bind(facts.publishers.as_ref().map(Json))
    .bind(facts.has_demo)
    .bind(price)
    .bind(facts.total_reviews)
    .bind(facts.recent_reviews_30d)
    .bind(facts.positive_ratio)
    .execute(executor)
    .await?;

    Ok(())
}

/// Cache freshly computed scores and their breakdowns on the game row.
///
/// # Errors
///
/// Returns [`DbError::Json`] if a breakdown cannot be encoded,
/// [`DbError::NotFound`] if the game does not exist, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn update_game_scores<I, Q>(
    pool: &PgPool,
    app_id: i64,
    intent_score: i32,
    intent_reasons: &I,
    quality_score: i32,
    quality_reasons: &Q,
) -> Result<(), DbError>
where
    I: Serialize + ?Sized,
    Q: Serialize + ?Sized,
{
    let intent_reasons = serde_json::to_value(intent_reasons)?;
    let quality_reasons = serde_json::to_value(quality_reasons)?;

    let result = sqlx::query(
        "UPDATE games \
         SET intent_score = $2, intent_reasons = $3, \
             quality_score = $4, quality_reasons = $5, \
             scored_at = NOW(), updated_at = NOW() \
         WHERE app_id = $1",
    )
    .bind(app_id)
    .bind(intent_score)
    .bind(intent_reasons)
    .bind(quality_score)
    .bind(quality_reasons)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Returns app ids of games never scored, or scored longer than
/// `stale_hours` ago.
///
/// Used by the scheduler to pick games for score recomputation.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_games_needing_rescore(
    pool: &PgPool,
    stale_hours: i32,
) -> Result<Vec<i64>, DbError> {
    Ok(sqlx::query_scalar::<_, i64>(
        "SELECT app_id FROM games \
         WHERE scored_at IS NULL OR scored_at < NOW() - make_interval(hours => $1) \
         ORDER BY app_id",
    )
    .bind(stale_hours)
    .fetch_all(pool)
    .await?)
}
