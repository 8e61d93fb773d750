//! GET/POST /api/v1/games/:app_id/actions: analyst action log.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use scout_core::DealActionType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, require_game, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ActionsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateActionRequest {
    pub action_type: String,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct ActionItem {
    pub id: i64,
    pub public_id: Uuid,
    pub app_id: i64,
    pub action_type: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<scout_db::DealActionRow> for ActionItem {
    fn from(r: scout_db::DealActionRow) -> Self {
        Self {
            id: r.id,
            public_id: r.public_id,
            app_id: r.app_id,
            action_type: r.action_type,
            payload: r.payload,
            created_at: r.created_at,
        }
    }
}

pub(super) async fn list_actions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
    Query(query): Query<ActionsQuery>,
) -> Result<Json<ApiResponse<Vec<ActionItem>>>, ApiError> {
    require_game(&state.pool, app_id, &req_id.0).await?;

    let rows = scout_db::list_deal_actions(&state.pool, app_id, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        rows.into_iter().map(ActionItem::from).collect(),
        req_id.0,
    )))
}

pub(super) async fn create_action(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
    Json(body): Json<CreateActionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActionItem>>), ApiError> {
    let action_type: DealActionType = body
        .action_type
        .parse()
        .map_err(|e: scout_core::CoreError| {
            ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
        })?;

    let payload = body
        .payload
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
    if !payload.is_object() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "payload must be a JSON object",
        ));
    }

    require_game(&state.pool, app_id, &req_id.0).await?;

    let row = scout_db::insert_deal_action(&state.pool, app_id, action_type, &payload)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(app_id, action_type = %action_type, "deal action recorded");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ActionItem::from(row), req_id.0)),
    ))
}
