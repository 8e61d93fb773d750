//! GET /api/v1/deals and GET /api/v1/deals/shortlist.
//!
//! Every tracked game is assessed fresh on each request; the anti-success
//! gate is always applied.

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use scout_core::{PublisherStatus, Stage};
use scout_scoring::{Candidate, DealAssessment, DealFilter, ShortlistFilter};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct DealsQuery {
    pub min_intent_score: Option<i32>,
    pub min_quality_score: Option<i32>,
    pub stage: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ShortlistQuery {
    pub min_intent_score: Option<i32>,
    pub min_quality_score: Option<i32>,
    pub stage: Option<String>,
    pub min_confidence: Option<f64>,
    /// Comma-separated archetype codes.
    pub archetypes: Option<String>,
    pub publisher_status: Option<String>,
    pub temporal_context: Option<String>,
    /// Comma-separated interest-party codes.
    pub interest_parties: Option<String>,
    pub limit: Option<i64>,
}

fn invalid(req_id: &str, err: impl Display) -> ApiError {
    ApiError::new(req_id, "validation_error", err.to_string())
}

fn parse_one<T>(raw: Option<&str>, req_id: &str) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<T>)
        .transpose()
        .map_err(|e| invalid(req_id, e))
}

/// Parse a comma-separated list; blank items are ignored.
fn parse_list<T>(raw: Option<&str>, req_id: &str) -> Result<Vec<T>, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(|e| invalid(req_id, e)))
        .collect()
}

fn limit_usize(limit: Option<i64>) -> usize {
    // normalize_limit clamps to 1..=200.
    usize::try_from(normalize_limit(limit)).unwrap_or(usize::MAX)
}

async fn load_candidates(state: &AppState, req_id: &str) -> Result<Vec<Candidate>, ApiError> {
    let inputs = scout_db::load_all_game_inputs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?;

    let now = Utc::now();
    Ok(inputs
        .into_iter()
        .map(|i| {
            let stage = i.facts.stage;
            (scout_scoring::assess(&i.facts, &i.signals, now), stage)
        })
        .collect())
}

pub(super) async fn list_deals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DealsQuery>,
) -> Result<Json<ApiResponse<Vec<DealAssessment>>>, ApiError> {
    let filter = DealFilter {
        min_intent_score: query.min_intent_score.unwrap_or(0),
        min_quality_score: query.min_quality_score.unwrap_or(0),
        stage: parse_one::<Stage>(query.stage.as_deref(), &req_id.0)?,
    };

    let candidates = load_candidates(&state, &req_id.0).await?;
    let deals = scout_scoring::select_deals(candidates, &filter, limit_usize(query.limit));

    Ok(Json(ApiResponse::new(deals, req_id.0)))
}

pub(super) async fn list_shortlist(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ShortlistQuery>,
) -> Result<Json<ApiResponse<Vec<DealAssessment>>>, ApiError> {
    let defaults = ShortlistFilter::default();
    let min_confidence = query.min_confidence.unwrap_or(defaults.min_confidence);
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(invalid(&req_id.0, "min_confidence must be between 0 and 1"));
    }

    let filter = ShortlistFilter {
        deal: DealFilter {
            min_intent_score: query.min_intent_score.unwrap_or(0),
            min_quality_score: query.min_quality_score.unwrap_or(0),
            stage: parse_one::<Stage>(query.stage.as_deref(), &req_id.0)?,
        },
        min_confidence,
        archetypes: parse_list(query.archetypes.as_deref(), &req_id.0)?,
        publisher_status: parse_one::<PublisherStatus>(
            query.publisher_status.as_deref(),
            &req_id.0,
        )?,
        temporal_context: parse_one(query.temporal_context.as_deref(), &req_id.0)?,
        interest_parties: parse_list(query.interest_parties.as_deref(), &req_id.0)?,
    };

    let candidates = load_candidates(&state, &req_id.0).await?;
    let picked = scout_scoring::shortlist(candidates, &filter, limit_usize(query.limit));

    Ok(Json(ApiResponse::new(picked, req_id.0)))
}

#[cfg(test)]
mod tests {
    use scout_scoring::{Archetype, InterestParty};

    use super::*;

    #[test]
    fn parse_list_skips_blanks() {
        let parsed: Vec<Archetype> = parse_list(
            Some("early_publisher_search, ,late_pivot_after_release"),
            "req",
        )
        .expect("valid codes");
        assert_eq!(
            parsed,
            vec![Archetype::EarlyPublisherSearch, Archetype::LatePivotAfterRelease]
        );
        assert!(parse_list::<InterestParty>(None, "req").unwrap().is_empty());
    }

    #[test]
    fn parse_list_rejects_unknown_code() {
        let err = parse_list::<InterestParty>(Some("scout_fund,banker"), "req").unwrap_err();
        assert_eq!(err.error.code, "validation_error");
        assert!(err.error.message.contains("banker"));
    }

    #[test]
    fn parse_one_treats_blank_as_absent() {
        assert_eq!(parse_one::<Stage>(Some("  "), "req").unwrap(), None);
        assert_eq!(parse_one::<Stage>(Some("demo"), "req").unwrap(), Some(Stage::Demo));
        assert!(parse_one::<Stage>(Some("alpha"), "req").is_err());
    }
}
