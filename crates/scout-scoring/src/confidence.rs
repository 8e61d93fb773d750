//! Confidence in the assigned archetype.
//!
//! Deltas are summed in integer hundredths and clamped before conversion, so
//! the same evidence always yields the same two-decimal value.

use serde::Serialize;

use crate::thresholds::{
    CONFIDENCE_SCALE, C_ALL_SIGNALS_STALE, C_FRESH_BEHAVIORAL, C_INTENT_PRESENT, C_QUALITY_ZERO,
    C_STAGE_CONSISTENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceRule {
    FreshBehavioral,
    StageConsistent,
    IntentPresent,
    QualityZero,
    AllSignalsStale,
}

impl ConfidenceRule {
    pub const ALL: [ConfidenceRule; 5] = [
        ConfidenceRule::FreshBehavioral,
        ConfidenceRule::StageConsistent,
        ConfidenceRule::IntentPresent,
        ConfidenceRule::QualityZero,
        ConfidenceRule::AllSignalsStale,
    ];

    /// Signed adjustment in hundredths.
    #[must_use]
    pub fn delta_hundredths(self) -> i32 {
        match self {
            ConfidenceRule::FreshBehavioral => C_FRESH_BEHAVIORAL,
            ConfidenceRule::StageConsistent => C_STAGE_CONSISTENT,
            ConfidenceRule::IntentPresent => C_INTENT_PRESENT,
            ConfidenceRule::QualityZero => C_QUALITY_ZERO,
            ConfidenceRule::AllSignalsStale => C_ALL_SIGNALS_STALE,
        }
    }

    fn applies(self, input: &ConfidenceInput) -> bool {
        match self {
            ConfidenceRule::FreshBehavioral => input.has_fresh_behavioral,
            ConfidenceRule::StageConsistent => input.stage_consistent,
            ConfidenceRule::IntentPresent => input.intent_score > 0,
            ConfidenceRule::QualityZero => input.quality_score == 0,
            ConfidenceRule::AllSignalsStale => input.all_signals_stale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfidenceInput {
    pub has_fresh_behavioral: bool,
    pub stage_consistent: bool,
    pub intent_score: i32,
    pub quality_score: i32,
    /// At least one signal exists and every one is older than `WEAK_DAYS`.
    pub all_signals_stale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceAdjustment {
    pub rule: ConfidenceRule,
    pub applied: bool,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confidence {
    pub value: f64,
    pub breakdown: Vec<ConfidenceAdjustment>,
}

fn hundredths_to_f64(value: i32) -> f64 {
    f64::from(value) / f64::from(CONFIDENCE_SCALE)
}

#[must_use]
pub fn compute_confidence(input: &ConfidenceInput) -> Confidence {
    let mut total = 0;
    let breakdown = ConfidenceRule::ALL
        .into_iter()
        .map(|rule| {
            let applied = rule.applies(input);
            if applied {
                total += rule.delta_hundredths();
            }
            ConfidenceAdjustment {
                rule,
                applied,
                delta: hundredths_to_f64(rule.delta_hundredths()),
            }
        })
        .collect();

    Confidence {
        value: hundredths_to_f64(total.clamp(0, CONFIDENCE_SCALE)),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ConfidenceInput {
        ConfidenceInput {
            has_fresh_behavioral: false,
            stage_consistent: false,
            intent_score: 0,
            quality_score: 1,
            all_signals_stale: false,
        }
    }

    #[test]
    fn nothing_applied_is_zero() {
        let c = compute_confidence(&input());
        assert!(c.value.abs() < f64::EPSILON);
        assert_eq!(c.breakdown.len(), 5);
        assert!(c.breakdown.iter().all(|a| !a.applied));
    }

    #[test]
    fn every_positive_rule() {
        let c = compute_confidence(&ConfidenceInput {
            has_fresh_behavioral: true,
            stage_consistent: true,
            intent_score: 4,
            ..input()
        });
        assert!((c.value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn penalties_clamp_at_zero() {
        let c = compute_confidence(&ConfidenceInput {
            quality_score: 0,
            all_signals_stale: true,
            ..input()
        });
        assert!(c.value.abs() < f64::EPSILON);
        let applied: Vec<ConfidenceRule> = c
            .breakdown
            .iter()
            .filter(|a| a.applied)
            .map(|a| a.rule)
            .collect();
        assert_eq!(
            applied,
            vec![ConfidenceRule::QualityZero, ConfidenceRule::AllSignalsStale]
        );
    }

    #[test]
    fn quality_zero_costs_two_tenths() {
        let full = ConfidenceInput {
            has_fresh_behavioral: true,
            stage_consistent: true,
            intent_score: 4,
            ..input()
        };
        let zero = ConfidenceInput {
            quality_score: 0,
            ..full
        };
        let diff = compute_confidence(&full).value - compute_confidence(&zero).value;
        assert!((diff - 0.2).abs() < 1e-9);
    }

    #[test]
    fn breakdown_reports_nominal_deltas() {
        let c = compute_confidence(&input());
        let deltas: Vec<f64> = c.breakdown.iter().map(|a| a.delta).collect();
        assert_eq!(deltas, vec![0.3, 0.2, 0.1, -0.2, -0.2]);
    }

    #[test]
    fn breakdown_serializes_rule_codes() {
        let c = compute_confidence(&input());
        let json = serde_json::to_value(&c.breakdown[0]).unwrap();
        assert_eq!(json["rule"], "fresh_behavioral");
        assert_eq!(json["applied"], false);
    }
}
