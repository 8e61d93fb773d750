//! GET /api/v1/games/:app_id and POST /api/v1/games/:app_id/rescore.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use scout_scoring::DealAssessment;
use serde::Serialize;

use crate::middleware::RequestId;
use crate::rescore::rescore_game;

use super::{game_not_found, map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct RescoreResult {
    pub app_id: i64,
    pub intent_score: i32,
    pub quality_score: i32,
    pub scored_at: DateTime<Utc>,
}

async fn load_inputs(
    state: &AppState,
    app_id: i64,
    req_id: &str,
) -> Result<scout_db::GameInputs, ApiError> {
    scout_db::load_game_inputs(&state.pool, app_id)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?
        .ok_or_else(|| game_not_found(req_id.to_owned(), app_id))
}

/// Full assessment, computed fresh from the stored facts and signals.
pub(super) async fn get_game_assessment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
) -> Result<Json<ApiResponse<DealAssessment>>, ApiError> {
    let inputs = load_inputs(&state, app_id, &req_id.0).await?;
    let assessment = scout_scoring::assess(&inputs.facts, &inputs.signals, Utc::now());
    Ok(Json(ApiResponse::new(assessment, req_id.0)))
}

pub(super) async fn rescore(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
) -> Result<Json<ApiResponse<RescoreResult>>, ApiError> {
    let inputs = load_inputs(&state, app_id, &req_id.0).await?;
    let now = Utc::now();

    let assessment = rescore_game(&state.pool, &inputs, now)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        app_id,
        intent_score = assessment.intent_score,
        quality_score = assessment.quality_score,
        "game rescored on request"
    );

    Ok(Json(ApiResponse::new(
        RescoreResult {
            app_id,
            intent_score: assessment.intent_score,
            quality_score: assessment.quality_score,
            scored_at: now,
        },
        req_id.0,
    )))
}
