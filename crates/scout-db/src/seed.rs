use scout_core::{GameConfig, SignalSource};
use sqlx::PgPool;

use crate::games::{upsert_game, NewGame};
use crate::signals::{insert_signal, NewSignal};
use crate::DbError;

/// Counts reported by [`seed_games`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub games: usize,
    pub signals_inserted: usize,
    pub signals_skipped: usize,
}

/// Upsert games from the seed file together with their synthetic signals.
///
/// All writes run inside a single transaction; if any operation fails the
/// entire batch is rolled back. Signals already present (same source and
/// URL) are skipped, so re-seeding is idempotent for signals with a URL.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_games(pool: &PgPool, games: &[GameConfig]) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for game in games {
        let facts = game.to_facts();
        let steam_url = game.steam_url();
        upsert_game(
            &mut *tx,
            &NewGame {
                facts: &facts,
                steam_url: &steam_url,
                developer_name: game.developer.as_deref(),
            },
        )
        .await?;

        for seed in &game.signals {
            let source = SignalSource::parse_lossy(&seed.source);
            let inserted = insert_signal(
                &mut *tx,
                &NewSignal {
                    app_id: game.app_id,
                    source: source.as_str(),
                    signal_type: seed.signal_type,
                    url: seed.url.as_deref(),
                    text: &seed.text,
                    confidence: seed.confidence,
                    matched_keywords: &[],
                    intent_strength: 0,
                    published_at: seed.published_at,
                },
            )
            .await?;

            if inserted.is_some() {
                summary.signals_inserted += 1;
            } else {
                summary.signals_skipped += 1;
            }
        }

        summary.games += 1;
    }

    tx.commit().await?;
    Ok(summary)
}
