//! Deal-intent scoring engine.
//!
//! Pure functions over already-loaded game facts and signals: gates, intent
//! and quality scores, archetype cascade, confidence, publisher-interest
//! mapping and the composed thesis. No I/O happens here; `now` is always
//! passed in.

pub mod archetype;
pub mod breakdown;
pub mod confidence;
pub mod error;
pub mod gates;
pub mod import;
pub mod intent;
pub mod interest;
pub mod keywords;
pub mod pipeline;
pub mod quality;
pub mod shortlist;
pub mod temporal;
pub mod thesis;
pub mod thresholds;

pub use archetype::Archetype;
pub use breakdown::{Factor, ScoreCard, ScoreItem};
pub use confidence::{Confidence, ConfidenceAdjustment, ConfidenceRule};
pub use error::ScoringError;
pub use gates::GateResult;
pub use import::{prepare_signal, SignalDraft};
pub use interest::{Framing, InterestParty, PublisherInterest};
pub use keywords::{classify_text, TextClassification};
pub use pipeline::{assess, DealAssessment};
pub use shortlist::{select_deals, shortlist, Candidate, DealFilter, ShortlistFilter};
pub use temporal::TemporalContext;
pub use thesis::DealThesis;
