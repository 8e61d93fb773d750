//! Loads engine inputs (facts plus every signal) for one or many games.

use std::collections::HashMap;

use scout_core::{GameFacts, Signal};
use sqlx::PgPool;

use crate::games::{get_game, list_games};
use crate::signals::list_signals_for_games;
use crate::DbError;

/// Everything the scoring engine needs for a single game.
#[derive(Debug, Clone)]
pub struct GameInputs {
    pub facts: GameFacts,
    pub signals: Vec<Signal>,
}

/// Facts and signals for one game, or `None` if the game is not tracked.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn load_game_inputs(pool: &PgPool, app_id: i64) -> Result<Option<GameInputs>, DbError> {
    let Some(game) = get_game(pool, app_id).await? else {
        return Ok(None);
    };

    let signals = list_signals_for_games(pool, &[app_id])
        .await?
        .iter()
        .map(crate::SignalRow::to_signal)
        .collect();

    Ok(Some(GameInputs {
        facts: game.to_facts(),
        signals,
    }))
}

/// Inputs for every tracked game, ordered by app id. Two queries total.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn load_all_game_inputs(pool: &PgPool) -> Result<Vec<GameInputs>, DbError> {
    let games = list_games(pool).await?;
    let app_ids: Vec<i64> = games.iter().map(|g| g.app_id).collect();

    let mut by_game: HashMap<i64, Vec<Signal>> = HashMap::new();
    for row in list_signals_for_games(pool, &app_ids).await? {
        by_game.entry(row.app_id).or_default().push(row.to_signal());
    }

    Ok(games
        .iter()
        .map(|g| GameInputs {
            facts: g.to_facts(),
            signals: by_game.remove(&g.app_id).unwrap_or_default(),
        })
        .collect())
}
