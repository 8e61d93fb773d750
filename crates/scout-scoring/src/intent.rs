//! Intent score: how loudly a game's signals say it wants a deal.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scout_core::{Signal, SignalType};

use crate::breakdown::{Factor, ScoreCard};
use crate::thresholds::{
    CORROBORATING_SOURCES, FRESH_DAYS, W_INTENT_BEHAVIORAL, W_INTENT_CONTACT_LINK,
    W_INTENT_CORROBORATED, W_INTENT_FRESH_BEHAVIORAL, W_INTENT_KEYWORD,
    W_INTENT_RECENT_ANNOUNCEMENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentFactor {
    BehavioralIntent,
    FreshBehavioralIntent,
    IntentKeyword,
    ContactLink,
    RecentAnnouncement,
    CorroboratedSource,
}

impl IntentFactor {
    /// Evaluation order; breakdown items appear in this order.
    pub const ALL: [IntentFactor; 6] = [
        IntentFactor::BehavioralIntent,
        IntentFactor::FreshBehavioralIntent,
        IntentFactor::IntentKeyword,
        IntentFactor::ContactLink,
        IntentFactor::RecentAnnouncement,
        IntentFactor::CorroboratedSource,
    ];

    fn applies(self, signals: &[Signal], now: DateTime<Utc>) -> bool {
        let fresh = |s: &Signal| s.age_days(now) <= FRESH_DAYS;
        match self {
            IntentFactor::BehavioralIntent => signals.iter().any(Signal::is_behavioral),
            IntentFactor::FreshBehavioralIntent => {
                signals.iter().any(|s| s.is_behavioral() && fresh(s))
            }
            IntentFactor::IntentKeyword => signals
                .iter()
                .any(|s| s.signal_type == SignalType::IntentKeyword),
            IntentFactor::ContactLink => signals
                .iter()
                .any(|s| s.signal_type == SignalType::ExternalLink),
            IntentFactor::RecentAnnouncement => signals
                .iter()
                .any(|s| s.signal_type == SignalType::Announcement && fresh(s)),
            IntentFactor::CorroboratedSource => {
                signals.iter().map(|s| s.source).collect::<HashSet<_>>().len()
                    >= CORROBORATING_SOURCES
            }
        }
    }
}

impl Factor for IntentFactor {
    fn code(self) -> &'static str {
        match self {
            IntentFactor::BehavioralIntent => "behavioral_intent",
            IntentFactor::FreshBehavioralIntent => "fresh_behavioral_intent",
            IntentFactor::IntentKeyword => "intent_keyword",
            IntentFactor::ContactLink => "contact_link",
            IntentFactor::RecentAnnouncement => "recent_announcement",
            IntentFactor::CorroboratedSource => "corroborated_source",
        }
    }

    fn label(self) -> &'static str {
        match self {
            IntentFactor::BehavioralIntent => "Прямое заявление о поиске издателя или финансирования",
            IntentFactor::FreshBehavioralIntent => "Свежий запрос (до 60 дней)",
            IntentFactor::IntentKeyword => "Упоминания ключевых слов о сделке",
            IntentFactor::ContactLink => "Есть внешние контакты",
            IntentFactor::RecentAnnouncement => "Недавний анонс",
            IntentFactor::CorroboratedSource => "Сигналы из нескольких независимых источников",
        }
    }

    fn points(self) -> i32 {
        match self {
            IntentFactor::BehavioralIntent => W_INTENT_BEHAVIORAL,
            IntentFactor::FreshBehavioralIntent => W_INTENT_FRESH_BEHAVIORAL,
            IntentFactor::IntentKeyword => W_INTENT_KEYWORD,
            IntentFactor::ContactLink => W_INTENT_CONTACT_LINK,
            IntentFactor::RecentAnnouncement => W_INTENT_RECENT_ANNOUNCEMENT,
            IntentFactor::CorroboratedSource => W_INTENT_CORROBORATED,
        }
    }
}

/// Score the signal set for one game.
///
/// The list is treated as an unordered set: each factor is awarded at most
/// once no matter how many signals satisfy it.
#[must_use]
pub fn score_intent(signals: &[Signal], now: DateTime<Utc>) -> ScoreCard<IntentFactor> {
    IntentFactor::ALL
        .into_iter()
        .filter(|factor| factor.applies(signals, now))
        .collect()
}
