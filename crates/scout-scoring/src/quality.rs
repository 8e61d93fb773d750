//! Quality score: whether the game itself looks ready to back.

use scout_core::{GameFacts, Stage};

use crate::breakdown::{Factor, ScoreCard};
use crate::thresholds::{
    ACCESSIBLE_PRICE_MAX_EUR, REVIEW_ACTIVITY_MIN_30D, REVIEW_BASE_MIN, SOLID_RATING_RATIO,
    STRONG_RATING_RATIO, W_QUALITY_DEMO, W_QUALITY_PRE_RELEASE, W_QUALITY_PRICE,
    W_QUALITY_REVIEW_ACTIVITY, W_QUALITY_REVIEW_BASE, W_QUALITY_SOLID_RATING,
    W_QUALITY_STRONG_RATING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFactor {
    PlayableDemo,
    StrongRating,
    SolidRating,
    ReviewBase,
    ReviewActivity,
    PreReleaseWindow,
    AccessiblePrice,
}

impl QualityFactor {
    pub const ALL: [QualityFactor; 7] = [
        QualityFactor::PlayableDemo,
        QualityFactor::StrongRating,
        QualityFactor::SolidRating,
        QualityFactor::ReviewBase,
        QualityFactor::ReviewActivity,
        QualityFactor::PreReleaseWindow,
        QualityFactor::AccessiblePrice,
    ];

    fn applies(self, game: &GameFacts) -> bool {
        let ratio = game.positive_ratio;
        match self {
            QualityFactor::PlayableDemo => game.has_demo || game.stage == Some(Stage::Demo),
            QualityFactor::StrongRating => ratio.is_some_and(|r| r >= STRONG_RATING_RATIO),
            QualityFactor::SolidRating => {
                ratio.is_some_and(|r| (SOLID_RATING_RATIO..STRONG_RATING_RATIO).contains(&r))
            }
            QualityFactor::ReviewBase => game.total_reviews.is_some_and(|n| n >= REVIEW_BASE_MIN),
            QualityFactor::ReviewActivity => game
                .recent_reviews_30d
                .is_some_and(|n| n >= REVIEW_ACTIVITY_MIN_30D),
            QualityFactor::PreReleaseWindow => game.stage.is_some_and(Stage::is_pre_release),
            QualityFactor::AccessiblePrice => game
                .price_eur
                .is_some_and(|p| p > 0.0 && p <= ACCESSIBLE_PRICE_MAX_EUR),
        }
    }
}

impl Factor for QualityFactor {
    fn code(self) -> &'static str {
        match self {
            QualityFactor::PlayableDemo => "playable_demo",
            QualityFactor::StrongRating => "strong_rating",
            QualityFactor::SolidRating => "solid_rating",
            QualityFactor::ReviewBase => "review_base",
            QualityFactor::ReviewActivity => "review_activity",
            QualityFactor::PreReleaseWindow => "pre_release_window",
            QualityFactor::AccessiblePrice => "accessible_price",
        }
    }

    fn label(self) -> &'static str {
        match self {
            QualityFactor::PlayableDemo => "Есть демо",
            QualityFactor::StrongRating => "Хороший рейтинг (85%+)",
            QualityFactor::SolidRating => "Приемлемый рейтинг (75%+)",
            QualityFactor::ReviewBase => "Есть база отзывов (50+)",
            QualityFactor::ReviewActivity => "Активность: 10+ отзывов за 30 дней",
            QualityFactor::PreReleaseWindow => "Ещё не вышла (окно для издателя)",
            QualityFactor::AccessiblePrice => "Доступная цена (до 30€)",
        }
    }

    fn points(self) -> i32 {
        match self {
            QualityFactor::PlayableDemo => W_QUALITY_DEMO,
            QualityFactor::StrongRating => W_QUALITY_STRONG_RATING,
            QualityFactor::SolidRating => W_QUALITY_SOLID_RATING,
            QualityFactor::ReviewBase => W_QUALITY_REVIEW_BASE,
            QualityFactor::ReviewActivity => W_QUALITY_REVIEW_ACTIVITY,
            QualityFactor::PreReleaseWindow => W_QUALITY_PRE_RELEASE,
            QualityFactor::AccessiblePrice => W_QUALITY_PRICE,
        }
    }
}

/// Score storefront facts. Independent of signals; zero is a normal result.
#[must_use]
pub fn score_quality(game: &GameFacts) -> ScoreCard<QualityFactor> {
    QualityFactor::ALL
        .into_iter()
        .filter(|factor| factor.applies(game))
        .collect()
}
