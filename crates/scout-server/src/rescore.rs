use chrono::{DateTime, Utc};
use scout_db::{DbError, GameInputs};
use scout_scoring::DealAssessment;
use sqlx::PgPool;

/// Assess a game and cache its intent and quality scores on the game row.
pub(crate) async fn rescore_game(
    pool: &PgPool,
    inputs: &GameInputs,
    now: DateTime<Utc>,
) -> Result<DealAssessment, DbError> {
    let assessment = scout_scoring::assess(&inputs.facts, &inputs.signals, now);

    scout_db::update_game_scores(
        pool,
        assessment.app_id,
        assessment.intent_score,
        &assessment.intent_breakdown,
        assessment.quality_score,
        &assessment.quality_breakdown,
    )
    .await?;

    Ok(assessment)
}
