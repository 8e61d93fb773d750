//! Thesis composition: one explanatory object per game.

use scout_core::{GameFacts, Stage};
use serde::Serialize;

use crate::archetype::{classify, Archetype, ClassificationInput};
use crate::confidence::{compute_confidence, ConfidenceAdjustment, ConfidenceInput};
use crate::gates::GateResult;
use crate::interest::{map_publisher_interest, Framing, InterestInput, PublisherInterest};
use crate::temporal::TemporalContext;
use crate::thresholds::{FRESH_DAYS, VERY_FRESH_DAYS, WEAK_DAYS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealThesis {
    pub thesis: String,
    pub thesis_archetype: Archetype,
    pub temporal_context: TemporalContext,
    pub confidence: f64,
    pub confidence_breakdown: Vec<ConfidenceAdjustment>,
    pub supporting_facts: Vec<String>,
    pub counter_facts: Vec<String>,
    pub publisher_interest: PublisherInterest,
}

/// Everything upstream of the composer for one game.
#[derive(Debug, Clone, Copy)]
pub struct ThesisInput<'a> {
    pub game: &'a GameFacts,
    pub gates: &'a GateResult,
    pub intent_score: i32,
    pub quality_score: i32,
}

/// Classify, score confidence, map interest, and write the thesis.
#[must_use]
pub fn build_deal_thesis(input: &ThesisInput<'_>) -> DealThesis {
    let game = input.game;
    let gates = input.gates;
    let publisher_status = game.publisher_status();
    let framing = Framing::select(publisher_status, gates.latest_behavioral_age_days.is_some());

    let archetype = classify(&ClassificationInput {
        stage: game.stage,
        has_fresh_behavioral: gates.has_fresh_behavioral,
        latest_signal_age_days: gates.latest_signal_age_days,
        intent_score: input.intent_score,
        quality_score: input.quality_score,
    });

    let confidence = compute_confidence(&ConfidenceInput {
        has_fresh_behavioral: gates.has_fresh_behavioral,
        stage_consistent: archetype.stage_consistent(game.stage),
        intent_score: input.intent_score,
        quality_score: input.quality_score,
        all_signals_stale: gates.latest_signal_age_days.is_some_and(|d| d > WEAK_DAYS),
    });

    let temporal_context = TemporalContext::derive(gates.latest_behavioral_age_days, game.stage);

    let publisher_interest = map_publisher_interest(&InterestInput {
        archetype,
        framing,
        publisher_status,
        temporal_context,
        intent_score: input.intent_score,
        quality_score: input.quality_score,
    });

    let (supporting_facts, counter_facts) = collect_facts(input, framing);

    DealThesis {
        thesis: thesis_sentence(archetype, framing, gates),
        thesis_archetype: archetype,
        temporal_context,
        confidence: confidence.value,
        confidence_breakdown: confidence.breakdown,
        supporting_facts,
        counter_facts,
        publisher_interest,
    }
}

fn thesis_sentence(archetype: Archetype, framing: Framing, gates: &GateResult) -> String {
    let target = framing.target();
    let behavioral_age = gates.latest_behavioral_age_days;

    match archetype {
        Archetype::LatePivotAfterRelease => {
            format!("Поздний поворот: после релиза ищет {}", framing.ask())
        }
        Archetype::EarlyPublisherSearch => {
            if behavioral_age.is_some_and(|d| d < VERY_FRESH_DAYS) {
                format!("Активный поиск {target} на ранней стадии, хорошее соответствие")
            } else {
                format!("Ранний поиск {target}, хорошее соответствие")
            }
        }
        Archetype::WeakSignalExploration => "Устаревшее намерение, слабое продолжение".to_string(),
        Archetype::OpportunisticOutreach => {
            if gates.has_fresh_behavioral {
                format!("Недавнее намерение найти {target}, но стадия не даёт чёткой картины")
            } else {
                format!("Есть свежие упоминания, но прямого запроса на {target} нет")
            }
        }
        Archetype::HighIntentLowQuality => {
            format!("Есть намерение найти {target}, но качество игры не подтверждено")
        }
        Archetype::UnclearIntent => format!("Нет явных признаков активного поиска {target}"),
    }
}

fn collect_facts(input: &ThesisInput<'_>, framing: Framing) -> (Vec<String>, Vec<String>) {
    let game = input.game;
    let gates = input.gates;
    let target = framing.target();
    let mut supporting = Vec::new();
    let mut counter = Vec::new();

    match gates.latest_behavioral_age_days {
        Some(days) if days <= FRESH_DAYS => {
            supporting.push(format!("Сигналы поиска {target} ({days} дн. назад)"));
        }
        Some(days) if days > WEAK_DAYS => {
            counter.push(format!("Последний запрос был {days} дн. назад"));
        }
        Some(days) => counter.push(format!("Запрос остывает ({days} дн. назад)")),
        None => counter.push(format!("Нет прямых заявлений о поиске {target}")),
    }

    if gates.has_fresh_behavioral {
        match game.stage {
            Some(Stage::Released) => {
                supporting.push("Игра уже выпущена, но запрос свежий".to_string());
            }
            Some(stage) => supporting.push(format!(
                "Стадия «{}» с признаками поиска {target}",
                stage.label()
            )),
            None => {}
        }
    }

    if input.intent_score > 0 {
        supporting.push(format!("Оценка намерения: {}", input.intent_score));
    } else {
        counter.push("Оценка намерения равна нулю".to_string());
    }

    if input.quality_score > 0 {
        supporting.push(format!("Оценка качества: {}", input.quality_score));
    } else {
        counter.push("Оценка качества равна нулю".to_string());
    }

    if !gates.passes_freshness {
        counter.push("Нет свежего запроса, и стадия не оставляет окна для сделки".to_string());
    }

    if gates.already_successful {
        counter.push("Игра уже успешна по отзывам: помощь со стороны вряд ли нужна".to_string());
    }

    let publishers = game.publisher_names();
    if !publishers.is_empty() {
        counter.push(format!("Издатель в Steam: {}", publishers.join(", ")));
    }

    (supporting, counter)
}
