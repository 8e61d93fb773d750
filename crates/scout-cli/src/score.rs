//! `score` and `thesis` command handlers.

use chrono::Utc;
use scout_db::GameInputs;

/// Which games `score recompute` touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecomputeScope {
    One(i64),
    All,
    /// Never scored, or scored longer ago than this many hours.
    Stale(i32),
}

async fn load_scope(pool: &sqlx::PgPool, scope: RecomputeScope) -> anyhow::Result<Vec<GameInputs>> {
    match scope {
        RecomputeScope::One(app_id) => {
            let inputs = scout_db::load_game_inputs(pool, app_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("game {app_id} is not tracked; run `db seed` first"))?;
            Ok(vec![inputs])
        }
        RecomputeScope::All => Ok(scout_db::load_all_game_inputs(pool).await?),
        RecomputeScope::Stale(hours) => {
            let mut games = Vec::new();
            for app_id in scout_db::list_games_needing_rescore(pool, hours).await? {
                if let Some(inputs) = scout_db::load_game_inputs(pool, app_id).await? {
                    games.push(inputs);
                }
            }
            Ok(games)
        }
    }
}

/// Recompute and cache scores for the selected games.
///
/// A failed update is logged and the run continues; the command fails only
/// if every update failed.
///
/// # Errors
///
/// Returns an error if the games cannot be loaded or no update succeeded.
pub(crate) async fn run_score_recompute(
    pool: &sqlx::PgPool,
    scope: RecomputeScope,
) -> anyhow::Result<()> {
    let games = load_scope(pool, scope).await?;
    if games.is_empty() {
        println!("no games need rescoring");
        return Ok(());
    }

    let now = Utc::now();
    let mut failed = 0_usize;

    println!("{:<10}{:<8}{:<9}ARCHETYPE", "APP ID", "INTENT", "QUALITY");
    for inputs in &games {
        let assessment = scout_scoring::assess(&inputs.facts, &inputs.signals, now);
        let result = scout_db::update_game_scores(
            pool,
            assessment.app_id,
            assessment.intent_score,
            &assessment.intent_breakdown,
            assessment.quality_score,
            &assessment.quality_breakdown,
        )
        .await;

        match result {
            Ok(()) => println!(
                "{:<10}{:<8}{:<9}{}",
                assessment.app_id,
                assessment.intent_score,
                assessment.quality_score,
                assessment.thesis.thesis_archetype
            ),
            Err(e) => {
                tracing::error!(app_id = assessment.app_id, error = %e, "score update failed");
                failed += 1;
            }
        }
    }

    if failed == games.len() {
        anyhow::bail!("all {failed} score update(s) failed");
    }
    if failed > 0 {
        println!("{failed} game(s) failed; see log");
    }
    Ok(())
}

/// Print the assessment for one game as pretty JSON.
///
/// # Errors
///
/// Returns an error if the game is not tracked or the query fails.
pub(crate) async fn run_thesis(pool: &sqlx::PgPool, app_id: i64) -> anyhow::Result<()> {
    let inputs = scout_db::load_game_inputs(pool, app_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("game {app_id} is not tracked; run `db seed` first"))?;

    let assessment = scout_scoring::assess(&inputs.facts, &inputs.signals, Utc::now());
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
