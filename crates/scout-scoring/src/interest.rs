//! Publisher-interest mapping: who might care about a game, and what to do
//! about it.
//!
//! Framing is chosen up front and every sentence is built from it, so partner
//! framing never has publisher-search wording to begin with.

use std::str::FromStr;

use scout_core::PublisherStatus;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::error::ScoringError;
use crate::temporal::TemporalContext;

/// Risk flag carried by every game that already has a publisher.
pub const EXISTING_PUBLISHER_FLAG: &str =
    "У игры уже есть издатель: запрос может означать co-publishing, маркетинг или перезапуск релиза";

const FRESH_SIGNALS_NOTE: &str = "Сигналы свежие: контактировать сейчас";
const PARTNER_WHY_NOW: &str =
    "Издатель уже есть, поэтому речь о партнёрстве поверх текущего договора";
const PARTNER_NEXT_ACTION: &str = "Выяснить условия текущего издательского договора";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestParty {
    ScoutFund,
    GenrePublisher,
    MarketingPublisher,
    TurnaroundPublisher,
    OperatorPublisher,
    InfluencerPartner,
}

impl InterestParty {
    pub const ALL: [InterestParty; 6] = [
        InterestParty::ScoutFund,
        InterestParty::GenrePublisher,
        InterestParty::MarketingPublisher,
        InterestParty::TurnaroundPublisher,
        InterestParty::OperatorPublisher,
        InterestParty::InfluencerPartner,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InterestParty::ScoutFund => "scout_fund",
            InterestParty::GenrePublisher => "genre_publisher",
            InterestParty::MarketingPublisher => "marketing_publisher",
            InterestParty::TurnaroundPublisher => "turnaround_publisher",
            InterestParty::OperatorPublisher => "operator_publisher",
            InterestParty::InfluencerPartner => "influencer_partner",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InterestParty::ScoutFund => "Скаут/фонд",
            InterestParty::GenrePublisher => "Паблишер по жанру",
            InterestParty::MarketingPublisher => "Маркетинговый издатель (performance / UA)",
            InterestParty::TurnaroundPublisher => "Паблишер-спасатель (late-stage turnaround)",
            InterestParty::OperatorPublisher => "Паблишер-оператор (live ops / контент)",
            InterestParty::InfluencerPartner => "Инфлюенсер/партнёр (дистрибуция)",
        }
    }
}

impl FromStr for InterestParty {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterestParty::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ScoringError::unknown("interest party", s))
    }
}

/// Parties that typically pick up a game of this archetype.
#[must_use]
pub fn parties_for(archetype: Archetype, intent_score: i32) -> Vec<InterestParty> {
    use InterestParty::{
        GenrePublisher, InfluencerPartner, MarketingPublisher, OperatorPublisher, ScoutFund,
        TurnaroundPublisher,
    };

    match archetype {
        Archetype::EarlyPublisherSearch => vec![ScoutFund, GenrePublisher, MarketingPublisher],
        Archetype::LatePivotAfterRelease => {
            vec![TurnaroundPublisher, MarketingPublisher, OperatorPublisher]
        }
        Archetype::WeakSignalExploration => vec![ScoutFund, GenrePublisher],
        Archetype::OpportunisticOutreach => vec![InfluencerPartner, MarketingPublisher],
        Archetype::HighIntentLowQuality => vec![MarketingPublisher, InfluencerPartner],
        Archetype::UnclearIntent if intent_score > 0 => vec![ScoutFund],
        Archetype::UnclearIntent => Vec::new(),
    }
}

/// How generated text names what the team is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    Publisher,
    Partner,
}

impl Framing {
    /// Partner framing applies when the game already has a publisher and
    /// still shows an explicit ask.
    #[must_use]
    pub fn select(status: PublisherStatus, has_behavioral: bool) -> Self {
        if status == PublisherStatus::HasPublisher && has_behavioral {
            Framing::Partner
        } else {
            Framing::Publisher
        }
    }

    /// Genitive noun for the sought counterpart.
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Framing::Publisher => "издателя",
            Framing::Partner => "партнёра",
        }
    }

    /// Counterpart with the deal shapes it implies, for "ищет …" sentences.
    #[must_use]
    pub fn ask(self) -> &'static str {
        match self {
            Framing::Publisher => "издателя",
            Framing::Partner => "партнёра (co-publishing, маркетинг или перезапуск)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherInterest {
    pub who_might_care: Vec<String>,
    pub who_might_care_codes: Vec<InterestParty>,
    pub why_now: Vec<String>,
    pub risk_flags: Vec<String>,
    pub next_actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestInput {
    pub archetype: Archetype,
    pub framing: Framing,
    pub publisher_status: PublisherStatus,
    pub temporal_context: TemporalContext,
    pub intent_score: i32,
    pub quality_score: i32,
}

struct Playbook {
    why_now: Vec<String>,
    risk: Option<&'static str>,
    next_actions: Vec<&'static str>,
}

fn playbook(input: &InterestInput) -> Playbook {
    let ask = input.framing.ask();
    match input.archetype {
        Archetype::EarlyPublisherSearch => Playbook {
            why_now: vec![
                format!("Команда ищет {ask} до масштабирования: договориться сейчас дешевле и быстрее"),
                "Можно повлиять на позиционирование и маркетинг до выхода".to_string(),
            ],
            risk: (input.quality_score == 0).then_some(
                "Нет подтверждения качества по метрикам: нужен быстрый аудит демо, вишлистов и конверсий",
            ),
            next_actions: vec![
                "Запросить питч-дек, бюджет и план производства",
                "Попросить билд или демо и ключевые метрики (вишлисты, конверсия, удержание)",
            ],
        },
        Archetype::LatePivotAfterRelease => Playbook {
            why_now: vec![
                format!("После релиза команда ищет {ask}: значит, готова к изменениям"),
                "Окно для перезапуска сейчас самое короткое".to_string(),
            ],
            risk: Some("После релиза сложнее менять продукт: нужен чёткий план перезапуска"),
            next_actions: vec![
                "Проверить причины слабых продаж: страница, трейлер, цена, теги, онбординг",
                "Составить план на 90 дней: скидки, инфлюенсеры, обновления",
            ],
        },
        Archetype::WeakSignalExploration => Playbook {
            why_now: vec![
                "Сигналы устарели: интерес может быть неактуален, нужна перепроверка".to_string(),
            ],
            risk: Some("Сигналы старше 90 дней: возможно, партнёр уже найден или проект заброшен"),
            next_actions: vec![
                "Перепроверить актуальность по сайту, соцсетям и странице Steam; запросить статус",
            ],
        },
        Archetype::OpportunisticOutreach => Playbook {
            why_now: vec![
                "Есть признаки интереса, но контекст размыт: контакт можно проверить дёшево"
                    .to_string(),
            ],
            risk: Some("Неясны стадия, готовность и качество: риск пустой коммуникации"),
            next_actions: vec!["Короткий outreach: статус, билд, метрики и запрос материалов"],
        },
        Archetype::HighIntentLowQuality => Playbook {
            why_now: vec![format!(
                "Команда явно ищет {ask}, но качество не подтверждено метриками: подходит под быстрый тест"
            )],
            risk: Some("Высокий риск: качество и потенциал не доказаны"),
            next_actions: vec![
                "Только быстрый скрининг (15–30 минут): страница Steam, трейлер, демо, первые отзывы",
            ],
        },
        Archetype::UnclearIntent => Playbook {
            why_now: vec!["Данных недостаточно для интерпретации намерения".to_string()],
            risk: Some("Нет свежих сигналов или дат: выводы делать рано"),
            next_actions: vec!["Сначала собрать внешние сигналы и обновить источники"],
        },
    }
}

#[must_use]
pub fn map_publisher_interest(input: &InterestInput) -> PublisherInterest {
    let codes = parties_for(input.archetype, input.intent_score);
    let playbook = playbook(input);

    let mut why_now = Vec::with_capacity(playbook.why_now.len() + 2);
    if input.temporal_context == TemporalContext::RecentInterest {
        why_now.push(FRESH_SIGNALS_NOTE.to_string());
    }
    why_now.extend(playbook.why_now);

    let mut risk_flags = Vec::new();
    if input.publisher_status == PublisherStatus::HasPublisher {
        risk_flags.push(EXISTING_PUBLISHER_FLAG.to_string());
    }
    risk_flags.extend(playbook.risk.map(str::to_string));

    let mut next_actions: Vec<String> = playbook
        .next_actions
        .into_iter()
        .map(str::to_string)
        .collect();

    if input.framing == Framing::Partner {
        why_now.push(PARTNER_WHY_NOW.to_string());
        next_actions.push(PARTNER_NEXT_ACTION.to_string());
    }

    PublisherInterest {
        who_might_care: codes.iter().map(|p| p.label().to_string()).collect(),
        who_might_care_codes: codes,
        why_now,
        risk_flags,
        next_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(archetype: Archetype) -> InterestInput {
        InterestInput {
            archetype,
            framing: Framing::Publisher,
            publisher_status: PublisherStatus::SelfPublished,
            temporal_context: TemporalContext::Unknown,
            intent_score: 0,
            quality_score: 1,
        }
    }

    #[test]
    fn framing_needs_both_publisher_and_behavioral_ask() {
        assert_eq!(
            Framing::select(PublisherStatus::HasPublisher, true),
            Framing::Partner
        );
        assert_eq!(
            Framing::select(PublisherStatus::HasPublisher, false),
            Framing::Publisher
        );
        assert_eq!(
            Framing::select(PublisherStatus::SelfPublished, true),
            Framing::Publisher
        );
        assert_eq!(
            Framing::select(PublisherStatus::Unknown, true),
            Framing::Publisher
        );
    }

    #[test]
    fn archetype_party_mapping() {
        assert_eq!(
            parties_for(Archetype::EarlyPublisherSearch, 5),
            vec![
                InterestParty::ScoutFund,
                InterestParty::GenrePublisher,
                InterestParty::MarketingPublisher
            ]
        );
        assert_eq!(
            parties_for(Archetype::LatePivotAfterRelease, 5),
            vec![
                InterestParty::TurnaroundPublisher,
                InterestParty::MarketingPublisher,
                InterestParty::OperatorPublisher
            ]
        );
        assert!(parties_for(Archetype::UnclearIntent, 0).is_empty());
        assert_eq!(
            parties_for(Archetype::UnclearIntent, 1),
            vec![InterestParty::ScoutFund]
        );
    }

    #[test]
    fn labels_follow_codes() {
        let interest = map_publisher_interest(&input(Archetype::OpportunisticOutreach));
        assert_eq!(interest.who_might_care.len(), interest.who_might_care_codes.len());
        assert_eq!(
            interest.who_might_care[0],
            InterestParty::InfluencerPartner.label()
        );
    }

    #[test]
    fn partner_mode_adds_flag_and_avoids_publisher_search_wording() {
        let interest = map_publisher_interest(&InterestInput {
            framing: Framing::Partner,
            publisher_status: PublisherStatus::HasPublisher,
            temporal_context: TemporalContext::RecentInterest,
            intent_score: 6,
            ..input(Archetype::LatePivotAfterRelease)
        });
        assert_eq!(interest.risk_flags[0], EXISTING_PUBLISHER_FLAG);
        assert_eq!(interest.why_now[0], FRESH_SIGNALS_NOTE);
        assert!(interest.next_actions.iter().any(|a| a == PARTNER_NEXT_ACTION));
        let all_text = interest
            .why_now
            .iter()
            .chain(&interest.risk_flags)
            .chain(&interest.next_actions)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        assert!(!all_text.contains("ищет издателя"));
        assert!(all_text.contains("партнёра"));
    }

    #[test]
    fn existing_publisher_flag_even_without_partner_framing() {
        let interest = map_publisher_interest(&InterestInput {
            publisher_status: PublisherStatus::HasPublisher,
            ..input(Archetype::UnclearIntent)
        });
        assert!(interest.risk_flags.iter().any(|f| f == EXISTING_PUBLISHER_FLAG));
        assert!(!interest.next_actions.iter().any(|a| a == PARTNER_NEXT_ACTION));
    }

    #[test]
    fn early_search_flags_missing_quality() {
        let with_quality = map_publisher_interest(&input(Archetype::EarlyPublisherSearch));
        assert!(with_quality.risk_flags.is_empty());

        let zero = map_publisher_interest(&InterestInput {
            quality_score: 0,
            ..input(Archetype::EarlyPublisherSearch)
        });
        assert_eq!(zero.risk_flags.len(), 1);
    }

    #[test]
    fn every_archetype_has_advice() {
        for archetype in Archetype::ALL {
            let interest = map_publisher_interest(&input(archetype));
            assert!(!interest.why_now.is_empty(), "{archetype}");
            assert!(!interest.next_actions.is_empty(), "{archetype}");
        }
    }

    #[test]
    fn codes_serialize_snake_case() {
        let interest = map_publisher_interest(&input(Archetype::WeakSignalExploration));
        let json = serde_json::to_value(&interest).unwrap();
        assert_eq!(
            json["who_might_care_codes"],
            serde_json::json!(["scout_fund", "genre_publisher"])
        );
    }
}
