use chrono::{DateTime, Utc};
use scout_core::{GameFacts, PublisherStatus, Signal};
use serde::Serialize;

use crate::breakdown::ScoreItem;
use crate::gates::{evaluate_gates, GateResult, SignalAges};
use crate::intent::{score_intent, IntentFactor};
use crate::quality::{score_quality, QualityFactor};
use crate::thesis::{build_deal_thesis, DealThesis, ThesisInput};

/// Full scoring result for one game, in the shape the API returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealAssessment {
    pub app_id: i64,
    pub steam_name: Option<String>,
    pub intent_score: i32,
    pub quality_score: i32,
    pub intent_breakdown: Vec<ScoreItem<IntentFactor>>,
    pub quality_breakdown: Vec<ScoreItem<QualityFactor>>,
    pub publisher_status_code: PublisherStatus,
    pub publisher_status: &'static str,
    pub gates: GateResult,
    pub thesis: DealThesis,
}

/// Run every engine stage for one game.
///
/// `now` is explicit so that identical inputs always produce identical output.
#[must_use]
pub fn assess(game: &GameFacts, signals: &[Signal], now: DateTime<Utc>) -> DealAssessment {
    let gates = evaluate_gates(game, SignalAges::collect(signals, now), now);
    let intent = score_intent(signals, now);
    let quality = score_quality(game);
    let intent_score = intent.total();
    let quality_score = quality.total();

    let thesis = build_deal_thesis(&ThesisInput {
        game,
        gates: &gates,
        intent_score,
        quality_score,
    });

    tracing::debug!(
        app_id = game.app_id,
        intent_score,
        quality_score,
        archetype = %thesis.thesis_archetype,
        confidence = thesis.confidence,
        "assessed game"
    );

    let publisher_status = game.publisher_status();
    DealAssessment {
        app_id: game.app_id,
        steam_name: game.steam_name.clone(),
        intent_score,
        quality_score,
        intent_breakdown: intent.into_items(),
        quality_breakdown: quality.into_items(),
        publisher_status_code: publisher_status,
        publisher_status: publisher_status.label(),
        gates,
        thesis,
    }
}
