use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use regex::Regex;
use scout_core::{GameFacts, PublisherStatus, Signal, SignalSource, SignalType, Stage};
use scout_scoring::{assess, Archetype};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

fn stage_strategy() -> impl Strategy<Value = Option<Stage>> {
    prop_oneof![
        Just(None),
        Just(Some(Stage::ComingSoon)),
        Just(Some(Stage::Demo)),
        Just(Some(Stage::EarlyAccess)),
        Just(Some(Stage::Released)),
    ]
}

fn publishers_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
    prop_oneof![
        Just(None),
        Just(Some(vec![])),
        Just(Some(vec!["Acme Games".to_string()])),
        Just(Some(vec!["  ".to_string()])),
    ]
}

fn game_strategy() -> impl Strategy<Value = GameFacts> {
    (
        stage_strategy(),
        publishers_strategy(),
        any::<bool>(),
        proptest::option::of(0.0f64..80.0),
        proptest::option::of(0i64..6000),
        proptest::option::of(0i64..400),
        proptest::option::of(0.0f64..=1.0),
        proptest::option::of(-400i64..2000),
    )
        .prop_map(
            |(stage, publishers, has_demo, price, total, recent, ratio, release_offset)| {
                GameFacts {
                    app_id: 1,
                    steam_name: Some("Probe".to_string()),
                    stage,
                    release_date: release_offset
                        .map(|days| (now() - Duration::days(days)).date_naive()),
                    publishers,
                    has_demo,
                    price_eur: price,
                    total_reviews: total,
                    recent_reviews_30d: recent,
                    positive_ratio: ratio,
                }
            },
        )
}

fn signal_type_strategy() -> impl Strategy<Value = SignalType> {
    prop_oneof![
        Just(SignalType::IntentKeyword),
        Just(SignalType::BehavioralIntent),
        Just(SignalType::ExternalLink),
        Just(SignalType::Announcement),
        Just(SignalType::Other),
    ]
}

fn signal_strategy() -> impl Strategy<Value = Signal> {
    (
        signal_type_strategy(),
        proptest::option::of(-5i64..400),
        0i64..400,
        0.0f64..=1.0,
    )
        .prop_map(|(signal_type, published_ago, created_ago, confidence)| Signal {
            app_id: 1,
            source: SignalSource::Reddit,
            signal_type,
            text: "probe".to_string(),
            confidence,
            published_at: published_ago.map(|d| now() - Duration::days(d)),
            created_at: now() - Duration::days(created_ago),
        })
}

fn signals_strategy() -> impl Strategy<Value = Vec<Signal>> {
    proptest::collection::vec(signal_strategy(), 0..8)
}

fn generated_text(a: &scout_scoring::DealAssessment) -> Vec<String> {
    let interest = &a.thesis.publisher_interest;
    std::iter::once(a.thesis.thesis.clone())
        .chain(a.thesis.supporting_facts.iter().cloned())
        .chain(a.thesis.counter_facts.iter().cloned())
        .chain(interest.why_now.iter().cloned())
        .chain(interest.risk_flags.iter().cloned())
        .chain(interest.next_actions.iter().cloned())
        .collect()
}

proptest! {
    #[test]
    fn prop_assessment_is_deterministic(game in game_strategy(), signals in signals_strategy()) {
        let first = serde_json::to_string(&assess(&game, &signals, now())).unwrap();
        let second = serde_json::to_string(&assess(&game, &signals, now())).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_signal_order_is_irrelevant(game in game_strategy(), mut signals in signals_strategy()) {
        let forward = assess(&game, &signals, now());
        signals.reverse();
        prop_assert_eq!(assess(&game, &signals, now()), forward);
    }

    #[test]
    fn prop_archetype_stays_in_whitelist(game in game_strategy(), signals in signals_strategy()) {
        let a = assess(&game, &signals, now());
        prop_assert!(Archetype::ALL.contains(&a.thesis.thesis_archetype));

        let json = serde_json::to_value(&a).unwrap();
        let code = json["thesis"]["thesis_archetype"].as_str().unwrap().to_string();
        prop_assert!(code != "marketing_distress");
        prop_assert!(code.parse::<Archetype>().is_ok());
    }

    #[test]
    fn prop_confidence_bounded(game in game_strategy(), signals in signals_strategy()) {
        let a = assess(&game, &signals, now());
        prop_assert!((0.0..=1.0).contains(&a.thesis.confidence));
        if a.quality_score == 0 {
            prop_assert!(a.thesis.confidence < 1.0);
        }
    }

    #[test]
    fn prop_breakdown_sums_to_score(game in game_strategy(), signals in signals_strategy()) {
        let a = assess(&game, &signals, now());
        let intent: i32 = a.intent_breakdown.iter().map(|i| i.points()).sum();
        let quality: i32 = a.quality_breakdown.iter().map(|i| i.points()).sum();
        prop_assert_eq!(intent, a.intent_score);
        prop_assert_eq!(quality, a.quality_score);
    }

    #[test]
    fn prop_no_snake_case_labels(game in game_strategy(), signals in signals_strategy()) {
        let slug = Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)+$").unwrap();
        let a = assess(&game, &signals, now());
        for item in &a.intent_breakdown {
            prop_assert!(!slug.is_match(item.label()), "{}", item.label());
        }
        for item in &a.quality_breakdown {
            prop_assert!(!slug.is_match(item.label()), "{}", item.label());
        }
        for label in &a.thesis.publisher_interest.who_might_care {
            prop_assert!(!slug.is_match(label), "{}", label);
        }
    }

    #[test]
    fn prop_partner_mode_never_seeks_a_publisher(
        game in game_strategy(),
        mut signals in signals_strategy(),
        days_ago in 0i64..400,
    ) {
        let game = GameFacts { publishers: Some(vec!["Acme Games".to_string()]), ..game };
        signals.push(Signal {
            app_id: 1,
            source: SignalSource::Discord,
            signal_type: SignalType::BehavioralIntent,
            text: "probe".to_string(),
            confidence: 0.0,
            published_at: Some(now() - Duration::days(days_ago)),
            created_at: now(),
        });

        let a = assess(&game, &signals, now());
        prop_assert_eq!(a.publisher_status_code, PublisherStatus::HasPublisher);
        for text in generated_text(&a) {
            let lower = text.to_lowercase();
            prop_assert!(!lower.contains("ищет издателя"), "{}", text);
            prop_assert!(!lower.contains("seeking a publisher"), "{}", text);
        }
        prop_assert!(a
            .thesis
            .publisher_interest
            .risk_flags
            .iter()
            .any(|flag| flag.contains("уже есть издатель")));
    }

    #[test]
    fn prop_successful_games_flagged(game in game_strategy(), signals in signals_strategy()) {
        let game = GameFacts { total_reviews: Some(5000), ..game };
        prop_assert!(assess(&game, &signals, now()).gates.already_successful);
    }
}
