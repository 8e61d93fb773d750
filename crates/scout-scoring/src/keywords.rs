//! Keyword classification for imported signal text.

use scout_core::SignalType;
use serde::Serialize;

use self::KeywordGroup::{
    Announcement, ContactOpen, FundingSeeking, MarketingHelp, PitchDeck, PublisherSeeking,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordGroup {
    PublisherSeeking,
    FundingSeeking,
    PitchDeck,
    MarketingHelp,
    ContactOpen,
    Announcement,
}

impl KeywordGroup {
    /// Explicit first-person asks for a publisher or money.
    #[must_use]
    pub fn is_behavioral(self) -> bool {
        matches!(
            self,
            KeywordGroup::PublisherSeeking | KeywordGroup::FundingSeeking
        )
    }

    #[must_use]
    pub fn is_primary(self) -> bool {
        self != KeywordGroup::Announcement
    }
}

pub struct Keyword {
    pub phrase: &'static str,
    pub group: KeywordGroup,
    /// 1 (incidental) to 5 (explicit ask).
    pub strength: u8,
}

const fn kw(phrase: &'static str, group: KeywordGroup, strength: u8) -> Keyword {
    Keyword {
        phrase,
        group,
        strength,
    }
}

/// Phrases are lowercase; matching is a substring search over lowercased text.
pub const KEYWORDS: &[Keyword] = &[
    kw("looking for a publisher", PublisherSeeking, 5),
    kw("seeking publisher", PublisherSeeking, 5),
    kw("need a publisher", PublisherSeeking, 5),
    kw("publisher wanted", PublisherSeeking, 5),
    kw("publisher needed", PublisherSeeking, 5),
    kw("looking for publishing partner", PublisherSeeking, 5),
    kw("seeking funding", FundingSeeking, 5),
    kw("need funding", FundingSeeking, 5),
    kw("looking for funding", FundingSeeking, 5),
    kw("seeking investors", FundingSeeking, 5),
    kw("investment wanted", FundingSeeking, 5),
    kw("need investment", FundingSeeking, 5),
    kw("raising funds", FundingSeeking, 4),
    kw("pitch deck", PitchDeck, 4),
    kw("investor deck", PitchDeck, 4),
    kw("publishing deal", PitchDeck, 4),
    kw("need marketing help", MarketingHelp, 4),
    kw("seeking marketing", MarketingHelp, 4),
    kw("looking for marketing", MarketingHelp, 4),
    kw("need marketing support", MarketingHelp, 4),
    kw("we are looking for", ContactOpen, 4),
    kw("dm open", ContactOpen, 3),
    kw("contact us", ContactOpen, 3),
    kw("reach out", ContactOpen, 3),
    kw("get in touch", ContactOpen, 3),
    kw("wishlist", Announcement, 2),
    kw("steam page is live", Announcement, 2),
    kw("demo available", Announcement, 2),
    kw("next fest", Announcement, 2),
    kw("steam festival", Announcement, 2),
    kw("press kit", Announcement, 1),
    kw("coming soon", Announcement, 1),
    kw("early access", Announcement, 1),
    kw("launching soon", Announcement, 1),
];

pub const BEHAVIORAL_CONFIDENCE: f64 = 0.9;
pub const KEYWORD_CONFIDENCE: f64 = 0.8;
pub const ANNOUNCEMENT_CONFIDENCE: f64 = 0.5;
pub const LINK_CONFIDENCE: f64 = 0.3;

/// Confidence attached to a signal of the given type when it is imported.
#[must_use]
pub fn type_confidence(signal_type: SignalType) -> f64 {
    match signal_type {
        SignalType::BehavioralIntent => BEHAVIORAL_CONFIDENCE,
        SignalType::IntentKeyword => KEYWORD_CONFIDENCE,
        SignalType::Announcement => ANNOUNCEMENT_CONFIDENCE,
        SignalType::ExternalLink => LINK_CONFIDENCE,
        SignalType::Other => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextClassification {
    pub matched_keywords: Vec<&'static str>,
    /// Strongest matched phrase, 0 when nothing matched.
    pub intent_strength: u8,
    pub suggested_type: SignalType,
    pub confidence: f64,
}

/// Suggest a signal type for free text and an optional URL.
#[must_use]
pub fn classify_text(text: &str, has_url: bool) -> TextClassification {
    let haystack = text.to_lowercase();
    let matched: Vec<&Keyword> = KEYWORDS
        .iter()
        .filter(|k| haystack.contains(k.phrase))
        .collect();

    let suggested_type = if matched.iter().any(|k| k.group.is_behavioral()) {
        SignalType::BehavioralIntent
    } else if matched.iter().any(|k| k.group.is_primary()) {
        SignalType::IntentKeyword
    } else if !matched.is_empty() {
        SignalType::Announcement
    } else if has_url {
        SignalType::ExternalLink
    } else {
        SignalType::Other
    };

    TextClassification {
        intent_strength: matched.iter().map(|k| k.strength).max().unwrap_or(0),
        matched_keywords: matched.iter().map(|k| k.phrase).collect(),
        suggested_type,
        confidence: type_confidence(suggested_type),
    }
}
