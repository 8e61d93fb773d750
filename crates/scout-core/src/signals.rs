use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Kind of evidence a signal row represents.
///
/// `BehavioralIntent` is an explicit first-person ask ("we are looking for a
/// publisher") and is the only type the gates and archetype rules treat as
/// intent evidence. `IntentKeyword` is an incidental keyword hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    IntentKeyword,
    BehavioralIntent,
    ExternalLink,
    Announcement,
    Other,
}

impl SignalType {
    pub const ALL: [SignalType; 5] = [
        SignalType::IntentKeyword,
        SignalType::BehavioralIntent,
        SignalType::ExternalLink,
        SignalType::Announcement,
        SignalType::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::IntentKeyword => "intent_keyword",
            SignalType::BehavioralIntent => "behavioral_intent",
            SignalType::ExternalLink => "external_link",
            SignalType::Announcement => "announcement",
            SignalType::Other => "other",
        }
    }

    /// Stored values written by older collectors may not be recognised; they
    /// are kept as `Other` and never count as behavioral evidence.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or(SignalType::Other)
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSignalType(s.to_string()))
    }
}

/// Where a signal was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Discord,
    Twitter,
    X,
    Reddit,
    Website,
    Linkedin,
    Steam,
    Youtube,
    Other,
}

impl SignalSource {
    const NAMED: [SignalSource; 8] = [
        SignalSource::Discord,
        SignalSource::Twitter,
        SignalSource::X,
        SignalSource::Reddit,
        SignalSource::Website,
        SignalSource::Linkedin,
        SignalSource::Steam,
        SignalSource::Youtube,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalSource::Discord => "discord",
            SignalSource::Twitter => "twitter",
            SignalSource::X => "x",
            SignalSource::Reddit => "reddit",
            SignalSource::Website => "website",
            SignalSource::Linkedin => "linkedin",
            SignalSource::Steam => "steam",
            SignalSource::Youtube => "youtube",
            SignalSource::Other => "other",
        }
    }

    /// Case-insensitive; unknown origins collapse to `Other`.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        let lower = value.trim().to_ascii_lowercase();
        Self::NAMED
            .into_iter()
            .find(|s| s.as_str() == lower)
            .unwrap_or(SignalSource::Other)
    }
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed mention relevant to a game. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub app_id: i64,
    pub source: SignalSource,
    pub signal_type: SignalType,
    pub text: String,
    /// Source-reported confidence, `0.0` when the collector gave none.
    pub confidence: f64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Signal {
    /// Publication time when known, otherwise ingestion time.
    #[must_use]
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }

    /// Whole days between `observed_at` and `now`, floored at zero.
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.observed_at()).num_days().max(0)
    }

    #[must_use]
    pub fn is_behavioral(&self) -> bool {
        self.signal_type == SignalType::BehavioralIntent
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn signal(published_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> Signal {
        Signal {
            app_id: 10,
            source: SignalSource::Reddit,
            signal_type: SignalType::BehavioralIntent,
            text: "we are looking for a publisher".to_string(),
            confidence: 0.0,
            published_at,
            created_at,
        }
    }

    #[test]
    fn age_prefers_published_at() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let s = signal(Some(now - Duration::days(5)), now - Duration::days(1));
        assert_eq!(s.age_days(now), 5);
    }

    #[test]
    fn age_falls_back_to_created_at() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let s = signal(None, now - Duration::days(30));
        assert_eq!(s.age_days(now), 30);
    }

    #[test]
    fn future_dated_signal_has_zero_age() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let s = signal(Some(now + Duration::days(3)), now);
        assert_eq!(s.age_days(now), 0);
    }

    #[test]
    fn unknown_stored_signal_type_is_other() {
        assert_eq!(SignalType::from_stored("velocity"), SignalType::Other);
        assert_eq!(
            SignalType::from_stored("behavioral_intent"),
            SignalType::BehavioralIntent
        );
    }

    #[test]
    fn signal_type_parse_rejects_unknown() {
        assert!(matches!(
            "velocity".parse::<SignalType>(),
            Err(CoreError::InvalidSignalType(ref v)) if v == "velocity"
        ));
    }

    #[test]
    fn signal_source_is_case_insensitive() {
        assert_eq!(SignalSource::parse_lossy("Reddit"), SignalSource::Reddit);
        assert_eq!(SignalSource::parse_lossy(" X "), SignalSource::X);
        assert_eq!(SignalSource::parse_lossy("itch.io"), SignalSource::Other);
    }
}
