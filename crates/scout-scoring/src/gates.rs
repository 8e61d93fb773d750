//! Freshness and anti-success gates.

use chrono::{DateTime, Utc};
use scout_core::{GameFacts, Signal, Stage};
use serde::Serialize;

use crate::thresholds::{
    FRESH_DAYS, SUCCESS_POSITIVE_RATIO, SUCCESS_RATIO_MIN_REVIEWS, SUCCESS_RECENT_REVIEWS_30D,
    SUCCESS_TOTAL_REVIEWS, WEAK_DAYS,
};

/// Youngest signal ages for one game. Order of the input list is irrelevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalAges {
    pub latest_behavioral_days: Option<i64>,
    pub latest_any_days: Option<i64>,
}

impl SignalAges {
    #[must_use]
    pub fn collect(signals: &[Signal], now: DateTime<Utc>) -> Self {
        let latest_any_days = signals.iter().map(|s| s.age_days(now)).min();
        let latest_behavioral_days = signals
            .iter()
            .filter(|s| s.is_behavioral())
            .map(|s| s.age_days(now))
            .min();

        Self {
            latest_behavioral_days,
            latest_any_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GateResult {
    /// Youngest behavioral signal is at most `FRESH_DAYS` old.
    pub has_fresh_behavioral: bool,
    /// Youngest behavioral signal is older than `WEAK_DAYS`, or there is none.
    pub is_weak_signal: bool,
    pub already_successful: bool,
    /// Stage is coming soon, demo or early access.
    pub stage_window_open: bool,
    /// Fresh behavioral evidence or an open stage window.
    pub passes_freshness: bool,
    pub latest_behavioral_age_days: Option<i64>,
    pub latest_signal_age_days: Option<i64>,
    pub release_age_days: Option<i64>,
}

/// Evaluate every gate for one game. Missing facts never pass a gate.
#[must_use]
pub fn evaluate_gates(game: &GameFacts, ages: SignalAges, now: DateTime<Utc>) -> GateResult {
    let has_fresh_behavioral = ages
        .latest_behavioral_days
        .is_some_and(|days| days <= FRESH_DAYS);
    let is_weak_signal = ages
        .latest_behavioral_days
        .is_none_or(|days| days > WEAK_DAYS);
    let stage_window_open = game.stage.is_some_and(|stage| {
        matches!(
            stage,
            Stage::ComingSoon | Stage::Demo | Stage::EarlyAccess
        )
    });

    GateResult {
        has_fresh_behavioral,
        is_weak_signal,
        already_successful: is_already_successful(game),
        stage_window_open,
        passes_freshness: has_fresh_behavioral || stage_window_open,
        latest_behavioral_age_days: ages.latest_behavioral_days,
        latest_signal_age_days: ages.latest_any_days,
        release_age_days: game.release_age_days(now.date_naive()),
    }
}

/// Anti-success gate: the game already sells well enough not to need help.
#[must_use]
pub fn is_already_successful(game: &GameFacts) -> bool {
    let total = game.total_reviews.unwrap_or(0);
    let recent = game.recent_reviews_30d.unwrap_or(0);
    let ratio = game.positive_ratio.unwrap_or(0.0);

    recent >= SUCCESS_RECENT_REVIEWS_30D
        || total >= SUCCESS_TOTAL_REVIEWS
        || (ratio >= SUCCESS_POSITIVE_RATIO && total >= SUCCESS_RATIO_MIN_REVIEWS)
}
