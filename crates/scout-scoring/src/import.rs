//! Turns a raw imported mention into a classified signal ready to store.

use scout_core::{SignalSource, SignalType};
use serde::Serialize;

use crate::error::ScoringError;
use crate::keywords::{classify_text, type_confidence, TextClassification};

/// A validated, classified signal that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalDraft {
    /// Normalised source name (unknown origins become `other`).
    pub source: SignalSource,
    pub text: String,
    pub url: Option<String>,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub classification: TextClassification,
}

/// Validate and classify one imported mention.
///
/// An empty text with a URL is replaced by a placeholder naming both. An
/// explicit `signal_type` wins over the classifier's suggestion and brings
/// that type's confidence along.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidSignal`] when the source is blank or when
/// neither text nor URL is given.
pub fn prepare_signal(
    source: &str,
    text: Option<&str>,
    url: Option<&str>,
    explicit_type: Option<SignalType>,
) -> Result<SignalDraft, ScoringError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ScoringError::InvalidSignal("source must not be empty"));
    }

    let url = url.map(str::trim).filter(|u| !u.is_empty());
    let text = match (text.map(str::trim).filter(|t| !t.is_empty()), url) {
        (Some(t), _) => t.to_owned(),
        (None, Some(u)) => format!("Signal from {source}: {u}"),
        (None, None) => {
            return Err(ScoringError::InvalidSignal("either text or url is required"));
        }
    };

    let classification = classify_text(&text, url.is_some());
    let signal_type = explicit_type.unwrap_or(classification.suggested_type);

    Ok(SignalDraft {
        source: SignalSource::parse_lossy(source),
        url: url.map(ToOwned::to_owned),
        confidence: type_confidence(signal_type),
        signal_type,
        text,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_suggestion_is_used_by_default() {
        let draft = prepare_signal(
            "Twitter",
            Some("We are looking for a publisher!"),
            Some("https://x.com/a/1"),
            None,
        )
        .unwrap();
        assert_eq!(draft.source, SignalSource::Twitter);
        assert_eq!(draft.signal_type, SignalType::BehavioralIntent);
        assert!((draft.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_type_wins() {
        let draft = prepare_signal(
            "reddit",
            Some("We are looking for a publisher!"),
            None,
            Some(SignalType::Announcement),
        )
        .unwrap();
        assert_eq!(draft.signal_type, SignalType::Announcement);
        assert_eq!(
            draft.classification.suggested_type,
            SignalType::BehavioralIntent
        );
        assert!((draft.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn url_only_gets_placeholder_text() {
        let draft = prepare_signal("mastodon", Some("  "), Some("https://m.example/1"), None).unwrap();
        assert_eq!(draft.text, "Signal from mastodon: https://m.example/1");
        assert_eq!(draft.source, SignalSource::Other);
        assert_eq!(draft.signal_type, SignalType::ExternalLink);
    }

    #[test]
    fn rejects_blank_source_and_empty_body() {
        assert!(matches!(
            prepare_signal(" ", Some("hi"), None, None),
            Err(ScoringError::InvalidSignal(_))
        ));
        assert!(matches!(
            prepare_signal("discord", None, Some(""), None),
            Err(ScoringError::InvalidSignal(_))
        ));
    }
}
