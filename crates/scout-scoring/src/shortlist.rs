//! Deal listing and shortlist selection over computed assessments.

use std::cmp::Ordering;

use scout_core::{PublisherStatus, Stage};

use crate::archetype::Archetype;
use crate::interest::InterestParty;
use crate::pipeline::DealAssessment;
use crate::temporal::TemporalContext;
use crate::thresholds::SHORTLIST_MIN_CONFIDENCE;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealFilter {
    pub min_intent_score: i32,
    pub min_quality_score: i32,
    pub stage: Option<Stage>,
}

impl DealFilter {
    /// Already-successful games never pass, whatever the scores.
    #[must_use]
    pub fn matches(&self, assessment: &DealAssessment, stage: Option<Stage>) -> bool {
        !assessment.gates.already_successful
            && assessment.intent_score >= self.min_intent_score
            && assessment.quality_score >= self.min_quality_score
            && self.stage.is_none_or(|wanted| stage == Some(wanted))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistFilter {
    pub deal: DealFilter,
    pub min_confidence: f64,
    /// Empty means any.
    pub archetypes: Vec<Archetype>,
    pub publisher_status: Option<PublisherStatus>,
    pub temporal_context: Option<TemporalContext>,
    /// Keep games where at least one of these parties might care. Empty means any.
    pub interest_parties: Vec<InterestParty>,
}

impl Default for ShortlistFilter {
    fn default() -> Self {
        Self {
            deal: DealFilter::default(),
            min_confidence: SHORTLIST_MIN_CONFIDENCE,
            archetypes: Vec::new(),
            publisher_status: None,
            temporal_context: None,
            interest_parties: Vec::new(),
        }
    }
}

impl ShortlistFilter {
    #[must_use]
    pub fn matches(&self, assessment: &DealAssessment, stage: Option<Stage>) -> bool {
        let thesis = &assessment.thesis;
        let codes = &thesis.publisher_interest.who_might_care_codes;

        self.deal.matches(assessment, stage)
            && thesis.confidence >= self.min_confidence
            && (self.archetypes.is_empty() || self.archetypes.contains(&thesis.thesis_archetype))
            && self
                .publisher_status
                .is_none_or(|s| s == assessment.publisher_status_code)
            && self
                .temporal_context
                .is_none_or(|t| t == thesis.temporal_context)
            && (self.interest_parties.is_empty()
                || self.interest_parties.iter().any(|p| codes.contains(p)))
    }
}

/// An assessment paired with the stage it was computed for.
pub type Candidate = (DealAssessment, Option<Stage>);

fn deal_order(a: &DealAssessment, b: &DealAssessment) -> Ordering {
    b.intent_score
        .cmp(&a.intent_score)
        .then_with(|| b.quality_score.cmp(&a.quality_score))
        .then_with(|| a.app_id.cmp(&b.app_id))
}

fn shortlist_order(a: &DealAssessment, b: &DealAssessment) -> Ordering {
    let recent = |x: &DealAssessment| x.thesis.temporal_context == TemporalContext::RecentInterest;

    b.thesis
        .confidence
        .total_cmp(&a.thesis.confidence)
        .then_with(|| recent(b).cmp(&recent(a)))
        .then_with(|| b.intent_score.cmp(&a.intent_score))
        .then_with(|| a.app_id.cmp(&b.app_id))
}

/// Filter and rank for the deals list: intent, then quality, then app id.
#[must_use]
pub fn select_deals(
    candidates: Vec<Candidate>,
    filter: &DealFilter,
    limit: usize,
) -> Vec<DealAssessment> {
    let mut deals: Vec<DealAssessment> = candidates
        .into_iter()
        .filter(|(a, stage)| filter.matches(a, *stage))
        .map(|(a, _)| a)
        .collect();
    deals.sort_by(deal_order);
    deals.truncate(limit);
    deals
}

/// Filter and rank for the shortlist: confidence, fresh interest, intent, app id.
#[must_use]
pub fn shortlist(
    candidates: Vec<Candidate>,
    filter: &ShortlistFilter,
    limit: usize,
) -> Vec<DealAssessment> {
    let mut deals: Vec<DealAssessment> = candidates
        .into_iter()
        .filter(|(a, stage)| filter.matches(a, *stage))
        .map(|(a, _)| a)
        .collect();
    deals.sort_by(shortlist_order);
    deals.truncate(limit);
    deals
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use scout_core::{GameFacts, Signal, SignalSource, SignalType};

    use super::*;
    use crate::pipeline::assess;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap()
    }

    fn behavioral(app_id: i64, days_ago: i64) -> Signal {
        Signal {
            app_id,
            source: SignalSource::Twitter,
            signal_type: SignalType::BehavioralIntent,
            text: "seeking publisher".to_string(),
            confidence: 0.0,
            published_at: Some(now() - Duration::days(days_ago)),
            created_at: now(),
        }
    }

    fn candidate(game: GameFacts, signals: &[Signal]) -> Candidate {
        let stage = game.stage;
        (assess(&game, signals, now()), stage)
    }

    fn demo_game(app_id: i64) -> GameFacts {
        GameFacts {
            app_id,
            stage: Some(Stage::Demo),
            publishers: Some(vec![]),
            ..GameFacts::default()
        }
    }

    #[test]
    fn successful_games_are_always_excluded() {
        let hit = GameFacts {
            total_reviews: Some(5000),
            positive_ratio: Some(0.95),
            ..demo_game(1)
        };
        let deals = select_deals(
            vec![candidate(hit, &[behavioral(1, 2)]), candidate(demo_game(2), &[])],
            &DealFilter::default(),
            50,
        );
        let ids: Vec<i64> = deals.iter().map(|d| d.app_id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn deals_sorted_by_intent_then_app_id() {
        let deals = select_deals(
            vec![
                candidate(demo_game(30), &[]),
                candidate(demo_game(20), &[behavioral(20, 3)]),
                candidate(demo_game(10), &[]),
            ],
            &DealFilter::default(),
            50,
        );
        let ids: Vec<i64> = deals.iter().map(|d| d.app_id).collect();
        assert_eq!(ids, vec![20, 10, 30]);
    }

    #[test]
    fn deal_filter_thresholds_and_stage() {
        let candidates = vec![
            candidate(demo_game(1), &[behavioral(1, 3)]),
            candidate(demo_game(2), &[]),
            candidate(
                GameFacts {
                    stage: Some(Stage::Released),
                    ..demo_game(3)
                },
                &[behavioral(3, 3)],
            ),
        ];
        let filter = DealFilter {
            min_intent_score: 1,
            stage: Some(Stage::Demo),
            ..DealFilter::default()
        };
        let deals = select_deals(candidates, &filter, 50);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].app_id, 1);
    }

    #[test]
    fn shortlist_applies_confidence_floor_and_order() {
        let candidates = vec![
            candidate(demo_game(5), &[]),
            candidate(demo_game(4), &[behavioral(4, 40)]),
            candidate(demo_game(3), &[behavioral(3, 2)]),
        ];
        let list = shortlist(candidates, &ShortlistFilter::default(), 50);
        let ids: Vec<i64> = list.iter().map(|d| d.app_id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(list.iter().all(|d| d.thesis.confidence >= SHORTLIST_MIN_CONFIDENCE));
    }

    #[test]
    fn shortlist_interest_party_filter() {
        let candidates = vec![candidate(demo_game(1), &[behavioral(1, 2)])];
        let turnaround = ShortlistFilter {
            interest_parties: vec![InterestParty::TurnaroundPublisher],
            ..ShortlistFilter::default()
        };
        assert!(shortlist(candidates.clone(), &turnaround, 50).is_empty());

        let scouts = ShortlistFilter {
            interest_parties: vec![InterestParty::ScoutFund, InterestParty::OperatorPublisher],
            ..ShortlistFilter::default()
        };
        assert_eq!(shortlist(candidates, &scouts, 50).len(), 1);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let candidates = (1..=5).map(|id| candidate(demo_game(id), &[])).collect();
        let deals = select_deals(candidates, &DealFilter::default(), 2);
        let ids: Vec<i64> = deals.iter().map(|d| d.app_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
