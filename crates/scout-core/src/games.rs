use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Steam storefront lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ComingSoon,
    Demo,
    EarlyAccess,
    Released,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ComingSoon,
        Stage::Demo,
        Stage::EarlyAccess,
        Stage::Released,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ComingSoon => "coming_soon",
            Stage::Demo => "demo",
            Stage::EarlyAccess => "early_access",
            Stage::Released => "released",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::ComingSoon => "Скоро выйдет",
            Stage::Demo => "Демо",
            Stage::EarlyAccess => "Ранний доступ",
            Stage::Released => "Выпущена",
        }
    }

    /// Coming soon or demo: the game has not shipped in any paid form yet.
    #[must_use]
    pub fn is_pre_release(self) -> bool {
        matches!(self, Stage::ComingSoon | Stage::Demo)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStage(s.to_string()))
    }
}

/// Whether a game already ships under an external publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherStatus {
    HasPublisher,
    SelfPublished,
    Unknown,
}

impl PublisherStatus {
    /// The only place publisher status is derived.
    ///
    /// `None` means the storefront never reported publishers. An empty list (or
    /// one holding only blank names) means the developer publishes itself.
    #[must_use]
    pub fn from_publishers(publishers: Option<&[String]>) -> Self {
        match publishers {
            None => PublisherStatus::Unknown,
            Some(list) if list.iter().all(|p| p.trim().is_empty()) => {
                PublisherStatus::SelfPublished
            }
            Some(_) => PublisherStatus::HasPublisher,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PublisherStatus::HasPublisher => "has_publisher",
            PublisherStatus::SelfPublished => "self_published",
            PublisherStatus::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PublisherStatus::HasPublisher => "Есть издатель",
            PublisherStatus::SelfPublished => "Самоиздание",
            PublisherStatus::Unknown => "Неизвестно",
        }
    }
}

impl std::fmt::Display for PublisherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublisherStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "has_publisher" => Ok(PublisherStatus::HasPublisher),
            "self_published" => Ok(PublisherStatus::SelfPublished),
            "unknown" => Ok(PublisherStatus::Unknown),
            other => Err(CoreError::InvalidPublisherStatus(other.to_string())),
        }
    }
}

/// Storefront facts for one tracked game, as loaded from the games table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameFacts {
    pub app_id: i64,
    pub steam_name: Option<String>,
    pub stage: Option<Stage>,
    pub release_date: Option<NaiveDate>,
    pub publishers: Option<Vec<String>>,
    pub has_demo: bool,
    pub price_eur: Option<f64>,
    pub total_reviews: Option<i64>,
    pub recent_reviews_30d: Option<i64>,
    pub positive_ratio: Option<f64>,
}

impl GameFacts {
    #[must_use]
    pub fn publisher_status(&self) -> PublisherStatus {
        PublisherStatus::from_publishers(self.publishers.as_deref())
    }

    /// Publisher names with blanks dropped, in storefront order.
    #[must_use]
    pub fn publisher_names(&self) -> Vec<&str> {
        self.publishers
            .iter()
            .flatten()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Whole days since release; `None` without a release date, `0` for future dates.
    #[must_use]
    pub fn release_age_days(&self, today: NaiveDate) -> Option<i64> {
        self.release_date
            .map(|date| (today - date).num_days().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_status_none_is_unknown() {
        assert_eq!(
            PublisherStatus::from_publishers(None),
            PublisherStatus::Unknown
        );
    }

    #[test]
    fn publisher_status_empty_is_self_published() {
        assert_eq!(
            PublisherStatus::from_publishers(Some(&[])),
            PublisherStatus::SelfPublished
        );
    }

    #[test]
    fn publisher_status_blank_names_count_as_empty() {
        let publishers = vec![String::new(), "  ".to_string()];
        assert_eq!(
            PublisherStatus::from_publishers(Some(&publishers)),
            PublisherStatus::SelfPublished
        );
    }

    #[test]
    fn publisher_status_named_publisher() {
        let publishers = vec!["Acme Games".to_string()];
        assert_eq!(
            PublisherStatus::from_publishers(Some(&publishers)),
            PublisherStatus::HasPublisher
        );
    }

    #[test]
    fn game_facts_delegates_publisher_status() {
        let game = GameFacts {
            app_id: 1,
            publishers: Some(vec![]),
            ..GameFacts::default()
        };
        assert_eq!(game.publisher_status(), PublisherStatus::SelfPublished);
        assert!(game.publisher_names().is_empty());
    }

    #[test]
    fn stage_parses_known_values() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>(), Ok(stage));
        }
    }

    #[test]
    fn stage_rejects_unknown_value() {
        assert_eq!(
            "prototype".parse::<Stage>(),
            Err(CoreError::InvalidStage("prototype".to_string()))
        );
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::EarlyAccess).unwrap();
        assert_eq!(json, "\"early_access\"");
    }

    #[test]
    fn release_age_clamps_future_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let game = GameFacts {
            release_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            ..GameFacts::default()
        };
        assert_eq!(game.release_age_days(today), Some(0));

        let released = GameFacts {
            release_date: NaiveDate::from_ymd_opt(2026, 2, 19),
            ..GameFacts::default()
        };
        assert_eq!(released.release_age_days(today), Some(10));
    }
}
