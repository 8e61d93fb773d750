//! Archetype classification as an ordered rule table.
//!
//! Rules are evaluated top to bottom and the first match wins. The
//! high-intent/low-quality rule sits after every evidence rule so it can only
//! ever replace `UnclearIntent`.

use std::str::FromStr;

use scout_core::Stage;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::thresholds::{FRESH_DAYS, WEAK_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    EarlyPublisherSearch,
    LatePivotAfterRelease,
    WeakSignalExploration,
    OpportunisticOutreach,
    HighIntentLowQuality,
    UnclearIntent,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::EarlyPublisherSearch,
        Archetype::LatePivotAfterRelease,
        Archetype::WeakSignalExploration,
        Archetype::OpportunisticOutreach,
        Archetype::HighIntentLowQuality,
        Archetype::UnclearIntent,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::EarlyPublisherSearch => "early_publisher_search",
            Archetype::LatePivotAfterRelease => "late_pivot_after_release",
            Archetype::WeakSignalExploration => "weak_signal_exploration",
            Archetype::OpportunisticOutreach => "opportunistic_outreach",
            Archetype::HighIntentLowQuality => "high_intent_low_quality",
            Archetype::UnclearIntent => "unclear_intent",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Archetype::EarlyPublisherSearch => "Ранний поиск",
            Archetype::LatePivotAfterRelease => "Поздний поворот после релиза",
            Archetype::WeakSignalExploration => "Слабый сигнал",
            Archetype::OpportunisticOutreach => "Точечный контакт",
            Archetype::HighIntentLowQuality => "Высокий интерес, низкое качество",
            Archetype::UnclearIntent => "Намерение неясно",
        }
    }

    /// Whether the game's stage is the one this archetype describes. Only the
    /// two stage-bound archetypes can be consistent.
    #[must_use]
    pub fn stage_consistent(self, stage: Option<Stage>) -> bool {
        match (self, stage) {
            (Archetype::EarlyPublisherSearch, Some(s)) => s.is_pre_release(),
            (Archetype::LatePivotAfterRelease, Some(s)) => s == Stage::Released,
            _ => false,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ScoringError::unknown("archetype", s))
    }
}

/// Everything the cascade looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationInput {
    pub stage: Option<Stage>,
    pub has_fresh_behavioral: bool,
    /// Age of the youngest signal of any type.
    pub latest_signal_age_days: Option<i64>,
    pub intent_score: i32,
    pub quality_score: i32,
}

pub struct Rule {
    pub archetype: Archetype,
    pub matches: fn(&ClassificationInput) -> bool,
}

pub const RULES: [Rule; 5] = [
    Rule {
        archetype: Archetype::LatePivotAfterRelease,
        matches: |i| i.stage == Some(Stage::Released) && i.has_fresh_behavioral,
    },
    Rule {
        archetype: Archetype::EarlyPublisherSearch,
        matches: |i| i.stage.is_some_and(Stage::is_pre_release) && i.has_fresh_behavioral,
    },
    Rule {
        archetype: Archetype::WeakSignalExploration,
        matches: |i| i.latest_signal_age_days.is_some_and(|d| d > WEAK_DAYS),
    },
    Rule {
        archetype: Archetype::OpportunisticOutreach,
        matches: |i| i.latest_signal_age_days.is_some_and(|d| d <= FRESH_DAYS),
    },
    Rule {
        archetype: Archetype::HighIntentLowQuality,
        matches: |i| i.intent_score > 0 && i.quality_score == 0,
    },
];

/// Index into [`RULES`] of the first rule that matches, if any.
#[must_use]
pub fn first_matching_rule(input: &ClassificationInput) -> Option<usize> {
    RULES.iter().position(|rule| (rule.matches)(input))
}

#[must_use]
pub fn classify(input: &ClassificationInput) -> Archetype {
    first_matching_rule(input).map_or(Archetype::UnclearIntent, |idx| RULES[idx].archetype)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ClassificationInput {
        ClassificationInput {
            stage: None,
            has_fresh_behavioral: false,
            latest_signal_age_days: None,
            intent_score: 0,
            quality_score: 0,
        }
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let order: Vec<Archetype> = RULES.iter().map(|r| r.archetype).collect();
        assert_eq!(
            order,
            vec![
                Archetype::LatePivotAfterRelease,
                Archetype::EarlyPublisherSearch,
                Archetype::WeakSignalExploration,
                Archetype::OpportunisticOutreach,
                Archetype::HighIntentLowQuality,
            ]
        );
    }

    #[test]
    fn rule_one_released_with_fresh_ask() {
        let i = ClassificationInput {
            stage: Some(Stage::Released),
            has_fresh_behavioral: true,
            latest_signal_age_days: Some(10),
            intent_score: 5,
            quality_score: 0,
        };
        assert_eq!(first_matching_rule(&i), Some(0));
        assert_eq!(classify(&i), Archetype::LatePivotAfterRelease);
    }

    #[test]
    fn rule_two_pre_release_with_fresh_ask() {
        for stage in [Stage::Demo, Stage::ComingSoon] {
            let i = ClassificationInput {
                stage: Some(stage),
                has_fresh_behavioral: true,
                latest_signal_age_days: Some(5),
                ..input()
            };
            assert_eq!(classify(&i), Archetype::EarlyPublisherSearch);
        }
    }

    #[test]
    fn early_access_with_fresh_ask_is_opportunistic() {
        let i = ClassificationInput {
            stage: Some(Stage::EarlyAccess),
            has_fresh_behavioral: true,
            latest_signal_age_days: Some(5),
            intent_score: 5,
            ..input()
        };
        assert_eq!(classify(&i), Archetype::OpportunisticOutreach);
    }

    #[test]
    fn rule_three_stale_evidence() {
        let i = ClassificationInput {
            stage: Some(Stage::Demo),
            latest_signal_age_days: Some(WEAK_DAYS + 1),
            intent_score: 3,
            ..input()
        };
        assert_eq!(classify(&i), Archetype::WeakSignalExploration);
    }

    #[test]
    fn rule_four_fresh_evidence_without_pattern() {
        let i = ClassificationInput {
            stage: Some(Stage::Released),
            latest_signal_age_days: Some(FRESH_DAYS),
            intent_score: 1,
            ..input()
        };
        assert_eq!(classify(&i), Archetype::OpportunisticOutreach);
    }

    #[test]
    fn cooling_evidence_falls_through_to_quality_fallback() {
        let i = ClassificationInput {
            stage: Some(Stage::Released),
            latest_signal_age_days: Some(75),
            intent_score: 3,
            quality_score: 0,
            ..input()
        };
        assert_eq!(first_matching_rule(&i), Some(4));
        assert_eq!(classify(&i), Archetype::HighIntentLowQuality);

        let with_quality = ClassificationInput {
            quality_score: 2,
            ..i
        };
        assert_eq!(classify(&with_quality), Archetype::UnclearIntent);
    }

    #[test]
    fn rule_five_only_without_signal_ages() {
        let i = ClassificationInput {
            intent_score: 2,
            quality_score: 0,
            ..input()
        };
        assert_eq!(classify(&i), Archetype::HighIntentLowQuality);
    }

    #[test]
    fn no_data_is_unclear() {
        assert_eq!(first_matching_rule(&input()), None);
        assert_eq!(classify(&input()), Archetype::UnclearIntent);
    }

    #[test]
    fn stage_consistency() {
        assert!(Archetype::EarlyPublisherSearch.stage_consistent(Some(Stage::Demo)));
        assert!(!Archetype::EarlyPublisherSearch.stage_consistent(Some(Stage::Released)));
        assert!(Archetype::LatePivotAfterRelease.stage_consistent(Some(Stage::Released)));
        assert!(!Archetype::HighIntentLowQuality.stage_consistent(Some(Stage::Demo)));
        assert!(!Archetype::WeakSignalExploration.stage_consistent(None));
    }

    #[test]
    fn stageless_archetypes_are_never_stage_consistent() {
        for stage in Stage::ALL {
            assert!(!Archetype::WeakSignalExploration.stage_consistent(Some(stage)));
            assert!(!Archetype::OpportunisticOutreach.stage_consistent(Some(stage)));
            assert!(!Archetype::UnclearIntent.stage_consistent(Some(stage)));
        }
    }

    #[test]
    fn marketing_distress_is_not_an_archetype() {
        assert!("marketing_distress".parse::<Archetype>().is_err());
        for archetype in Archetype::ALL {
            assert_eq!(archetype.as_str().parse::<Archetype>(), Ok(archetype));
        }
    }
}
