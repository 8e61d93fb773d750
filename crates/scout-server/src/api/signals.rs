//! GET/POST /api/v1/games/:app_id/signals: signal feed and manual import.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use scout_core::SignalType;
use scout_scoring::{SignalDraft, TextClassification};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;
use crate::rescore::rescore_game;

use super::{map_db_error, normalize_limit, require_game, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SignalsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignalItem {
    pub id: i64,
    pub public_id: Uuid,
    pub source: String,
    pub signal_type: String,
    pub url: Option<String>,
    pub text: String,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
    pub intent_strength: i16,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<scout_db::SignalRow> for SignalItem {
    fn from(r: scout_db::SignalRow) -> Self {
        Self {
            id: r.id,
            public_id: r.public_id,
            source: r.source,
            signal_type: r.signal_type,
            url: r.url,
            text: r.text,
            confidence: r.confidence,
            matched_keywords: r.matched_keywords.0,
            intent_strength: r.intent_strength,
            published_at: r.published_at,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ImportSignalRequest {
    pub source: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub signal_type: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ImportedSignal {
    pub signal: SignalItem,
    pub classification: TextClassification,
}

pub(super) async fn list_game_signals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
    Query(query): Query<SignalsQuery>,
) -> Result<Json<ApiResponse<Vec<SignalItem>>>, ApiError> {
    require_game(&state.pool, app_id, &req_id.0).await?;

    let rows = scout_db::list_signals_for_game(&state.pool, app_id, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        rows.into_iter().map(SignalItem::from).collect(),
        req_id.0,
    )))
}

fn draft_from_request(
    body: &ImportSignalRequest,
    req_id: &str,
) -> Result<SignalDraft, ApiError> {
    let explicit_type = body
        .signal_type
        .as_deref()
        .map(str::parse::<SignalType>)
        .transpose()
        .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))?;

    scout_scoring::prepare_signal(
        &body.source,
        body.text.as_deref(),
        body.url.as_deref(),
        explicit_type,
    )
    .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))
}

/// Store one manually imported signal, then refresh the game's cached scores.
pub(super) async fn import_signal(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(app_id): Path<i64>,
    Json(body): Json<ImportSignalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ImportedSignal>>), ApiError> {
    let draft = draft_from_request(&body, &req_id.0)?;
    require_game(&state.pool, app_id, &req_id.0).await?;

    let row = scout_db::insert_signal(
        &state.pool,
        &scout_db::NewSignal {
            app_id,
            source: draft.source.as_str(),
            signal_type: draft.signal_type,
            url: draft.url.as_deref(),
            text: &draft.text,
            confidence: draft.confidence,
            matched_keywords: &draft.classification.matched_keywords,
            intent_strength: i16::from(draft.classification.intent_strength),
            published_at: body.published_at,
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?
    .ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "conflict",
            "a signal with this source and url already exists",
        )
    })?;

    tracing::info!(
        app_id,
        signal_id = row.id,
        signal_type = %draft.signal_type,
        "signal imported"
    );

    match scout_db::load_game_inputs(&state.pool, app_id).await {
        Ok(Some(inputs)) => {
            if let Err(e) = rescore_game(&state.pool, &inputs, Utc::now()).await {
                tracing::warn!(app_id, error = %e, "rescore after import failed");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(app_id, error = %e, "rescore after import failed"),
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            ImportedSignal {
                signal: SignalItem::from(row),
                classification: draft.classification,
            },
            req_id.0,
        )),
    ))
}
