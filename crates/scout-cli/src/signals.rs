//! `signals` command handlers.

use chrono::{DateTime, Utc};
use scout_core::SignalType;

pub(crate) struct ImportArgs {
    pub app_id: i64,
    pub source: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub signal_type: Option<SignalType>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Classify one mention and append it to the game's signal log.
///
/// # Errors
///
/// Returns an error if the input is invalid, the game is not tracked, or
/// the same source and URL were already imported.
pub(crate) async fn run_signals_import(
    pool: &sqlx::PgPool,
    args: &ImportArgs,
) -> anyhow::Result<()> {
    let draft = scout_scoring::prepare_signal(
        &args.source,
        args.text.as_deref(),
        args.url.as_deref(),
        args.signal_type,
    )?;

    if scout_db::get_game(pool, args.app_id).await?.is_none() {
        anyhow::bail!("game {} is not tracked; run `db seed` first", args.app_id);
    }

    let row = scout_db::insert_signal(
        pool,
        &scout_db::NewSignal {
            app_id: args.app_id,
            source: draft.source.as_str(),
            signal_type: draft.signal_type,
            url: draft.url.as_deref(),
            text: &draft.text,
            confidence: draft.confidence,
            matched_keywords: &draft.classification.matched_keywords,
            intent_strength: i16::from(draft.classification.intent_strength),
            published_at: args.published_at,
        },
    )
    .await?
    .ok_or_else(|| anyhow::anyhow!("signal from {} with this url already exists", draft.source))?;

    println!(
        "signal {} stored as {} (confidence {:.2})",
        row.public_id, draft.signal_type, draft.confidence
    );
    if !draft.classification.matched_keywords.is_empty() {
        println!(
            "matched: {}",
            draft.classification.matched_keywords.join(", ")
        );
    }
    Ok(())
}
