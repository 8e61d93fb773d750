//! Every threshold and weight the engine uses. Nothing else in the crate
//! hard-codes a day count, review count, or point value.

// ---------------------------------------------------------------------------
// Freshness (days)
// ---------------------------------------------------------------------------

/// A behavioral signal this young counts as fresh evidence.
pub const FRESH_DAYS: i64 = 60;
/// Evidence older than this is weak.
pub const WEAK_DAYS: i64 = 90;
/// Behavioral interest younger than this is "cooling down" rather than stale.
pub const COOLING_DAYS: i64 = 180;
/// Behavioral interest younger than this reads as an active search.
pub const VERY_FRESH_DAYS: i64 = 14;

const _: () = assert!(
    VERY_FRESH_DAYS < FRESH_DAYS && FRESH_DAYS < WEAK_DAYS && WEAK_DAYS < COOLING_DAYS,
    "freshness windows must be strictly increasing"
);

// ---------------------------------------------------------------------------
// Anti-success gate
// ---------------------------------------------------------------------------

pub const SUCCESS_RECENT_REVIEWS_30D: i64 = 200;
pub const SUCCESS_TOTAL_REVIEWS: i64 = 2000;
pub const SUCCESS_POSITIVE_RATIO: f64 = 0.9;
/// Minimum review base for the positive-ratio branch of the gate.
pub const SUCCESS_RATIO_MIN_REVIEWS: i64 = 1000;

// ---------------------------------------------------------------------------
// Intent weights
// ---------------------------------------------------------------------------

pub const W_INTENT_BEHAVIORAL: i32 = 3;
pub const W_INTENT_FRESH_BEHAVIORAL: i32 = 2;
pub const W_INTENT_KEYWORD: i32 = 1;
pub const W_INTENT_CONTACT_LINK: i32 = 1;
pub const W_INTENT_RECENT_ANNOUNCEMENT: i32 = 1;
pub const W_INTENT_CORROBORATED: i32 = 1;

/// Distinct sources needed before a game's signals count as corroborated.
pub const CORROBORATING_SOURCES: usize = 2;

pub const MAX_INTENT_SCORE: i32 = W_INTENT_BEHAVIORAL
    + W_INTENT_FRESH_BEHAVIORAL
    + W_INTENT_KEYWORD
    + W_INTENT_CONTACT_LINK
    + W_INTENT_RECENT_ANNOUNCEMENT
    + W_INTENT_CORROBORATED;

// ---------------------------------------------------------------------------
// Quality weights
// ---------------------------------------------------------------------------

pub const W_QUALITY_DEMO: i32 = 2;
pub const W_QUALITY_STRONG_RATING: i32 = 3;
pub const W_QUALITY_SOLID_RATING: i32 = 2;
pub const W_QUALITY_REVIEW_BASE: i32 = 1;
pub const W_QUALITY_REVIEW_ACTIVITY: i32 = 1;
pub const W_QUALITY_PRE_RELEASE: i32 = 1;
pub const W_QUALITY_PRICE: i32 = 1;

pub const STRONG_RATING_RATIO: f64 = 0.85;
pub const SOLID_RATING_RATIO: f64 = 0.75;
pub const REVIEW_BASE_MIN: i64 = 50;
pub const REVIEW_ACTIVITY_MIN_30D: i64 = 10;
pub const ACCESSIBLE_PRICE_MAX_EUR: f64 = 30.0;

const _: () = assert!(
    W_QUALITY_STRONG_RATING > W_QUALITY_SOLID_RATING,
    "a strong rating must outweigh a solid one"
);

// ---------------------------------------------------------------------------
// Confidence deltas (hundredths)
// ---------------------------------------------------------------------------

pub const C_FRESH_BEHAVIORAL: i32 = 30;
pub const C_STAGE_CONSISTENT: i32 = 20;
pub const C_INTENT_PRESENT: i32 = 10;
pub const C_QUALITY_ZERO: i32 = -20;
pub const C_ALL_SIGNALS_STALE: i32 = -20;

pub const CONFIDENCE_SCALE: i32 = 100;

const _: () = assert!(
    C_FRESH_BEHAVIORAL + C_STAGE_CONSISTENT + C_INTENT_PRESENT <= CONFIDENCE_SCALE,
    "positive confidence deltas must not exceed 1.0"
);
const _: () = assert!(
    C_QUALITY_ZERO < 0 && C_ALL_SIGNALS_STALE < 0,
    "penalties must be negative"
);

// ---------------------------------------------------------------------------
// Shortlist
// ---------------------------------------------------------------------------

pub const SHORTLIST_MIN_CONFIDENCE: f64 = 0.4;
