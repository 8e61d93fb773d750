//! Temporal context: how recent a game's ask is relative to its stage.

use std::str::FromStr;

use scout_core::Stage;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::thresholds::{COOLING_DAYS, FRESH_DAYS};

/// Where a game sits in time relative to its latest ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalContext {
    RecentInterest,
    CoolingDown,
    Stale,
    PreReleaseWindow,
    PostRelease,
    Unknown,
}

impl TemporalContext {
    pub const ALL: [TemporalContext; 6] = [
        TemporalContext::RecentInterest,
        TemporalContext::CoolingDown,
        TemporalContext::Stale,
        TemporalContext::PreReleaseWindow,
        TemporalContext::PostRelease,
        TemporalContext::Unknown,
    ];

    /// Derive from the age of the youngest behavioral signal, falling back to
    /// the stage when there is none.
    #[must_use]
    pub fn derive(latest_behavioral_age_days: Option<i64>, stage: Option<Stage>) -> Self {
        match (latest_behavioral_age_days, stage) {
            (Some(days), _) if days <= FRESH_DAYS => TemporalContext::RecentInterest,
            (Some(days), _) if days <= COOLING_DAYS => TemporalContext::CoolingDown,
            (Some(_), _) => TemporalContext::Stale,
            (None, Some(Stage::Released)) => TemporalContext::PostRelease,
            (None, Some(_)) => TemporalContext::PreReleaseWindow,
            (None, None) => TemporalContext::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TemporalContext::RecentInterest => "recent_interest",
            TemporalContext::CoolingDown => "cooling_down",
            TemporalContext::Stale => "stale",
            TemporalContext::PreReleaseWindow => "pre_release_window",
            TemporalContext::PostRelease => "post_release",
            TemporalContext::Unknown => "unknown",
        }
    }
}

impl FromStr for TemporalContext {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemporalContext::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ScoringError::unknown("temporal context", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavioral_age_buckets() {
        assert_eq!(
            TemporalContext::derive(Some(0), None),
            TemporalContext::RecentInterest
        );
        assert_eq!(
            TemporalContext::derive(Some(FRESH_DAYS), Some(Stage::Released)),
            TemporalContext::RecentInterest
        );
        assert_eq!(
            TemporalContext::derive(Some(FRESH_DAYS + 1), Some(Stage::Demo)),
            TemporalContext::CoolingDown
        );
        assert_eq!(
            TemporalContext::derive(Some(COOLING_DAYS + 1), Some(Stage::Demo)),
            TemporalContext::Stale
        );
    }

    #[test]
    fn stage_fallback_without_behavioral_signal() {
        assert_eq!(
            TemporalContext::derive(None, Some(Stage::Released)),
            TemporalContext::PostRelease
        );
        assert_eq!(
            TemporalContext::derive(None, Some(Stage::EarlyAccess)),
            TemporalContext::PreReleaseWindow
        );
        assert_eq!(TemporalContext::derive(None, None), TemporalContext::Unknown);
    }

    #[test]
    fn codes_parse_back() {
        for ctx in TemporalContext::ALL {
            assert_eq!(ctx.as_str().parse::<TemporalContext>(), Ok(ctx));
        }
        assert!("fresh".parse::<TemporalContext>().is_err());
    }
}
