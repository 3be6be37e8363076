//! HTTP wrapper over the maia-core classifier.
//!
//! | route            | method | body / query      | response |
//! |------------------|--------|-------------------|----------|
//! | `/classify`      | POST   | raw sample (JSON) | `ConsciousnessState`, or 400 |
//! | `/history`       | GET    | `?limit=N`        | recent states, oldest first |
//! | `/trend`         | GET    | `?limit=N`        | `TrendSummary` |
//! | `/health`        | GET    |                   | status and history length |

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use maia_core::{
    Classifier, ConsciousnessState, FieldIssue, HistoryStore, InMemoryHistory, MaiaConfig,
    RawBiometricSample, TimestampInput, TrendSummary, ValidationError,
};

pub const DEFAULT_LIMIT: usize = 20;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    classifier: Classifier,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(classifier: Classifier, max_body_bytes: usize) -> Self {
        Self {
            classifier,
            max_body_bytes,
        }
    }

    pub fn from_config(config: &MaiaConfig) -> Self {
        let history: Option<Arc<dyn HistoryStore>> = if config.history.enabled {
            Some(Arc::new(InMemoryHistory::with_capacity(
                config.history.capacity,
            )))
        } else {
            None
        };
        Self::new(Classifier::new(history), config.server.max_body_bytes)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn history_len(&self) -> usize {
        self.classifier.history().map(|h| h.len()).unwrap_or(0)
    }

    fn clamp_limit(&self, limit: Option<usize>) -> usize {
        let cap = self
            .classifier
            .history()
            .map(|h| h.capacity())
            .unwrap_or(0);
        limit.unwrap_or(DEFAULT_LIMIT).min(cap)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: String,
    fields: &'a [FieldIssue],
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(err) => {
                let body = ErrorBody {
                    error: "validation_error",
                    message: self.to_string(),
                    fields: &err.issues,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub history_len: usize,
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/classify", post(classify_handler))
        .route("/history", get(history_handler))
        .route("/trend", get(trend_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

async fn classify_handler(
    State(state): State<AppState>,
    Json(mut raw): Json<RawBiometricSample>,
) -> Result<Json<ConsciousnessState>, ApiError> {
    if raw.timestamp.is_none() {
        raw.timestamp = Some(TimestampInput::Millis(now_ms()));
    }

    match state.classifier.process(&raw) {
        Ok(result) => {
            tracing::info!(
                source = %result.source,
                mode = %result.presence_mode,
                dominant = %result.dominant_element,
                coherence = result.coherence_level,
                "classified sample"
            );
            Ok(Json(result))
        }
        Err(err) => {
            tracing::warn!(fields = ?err.fields(), "rejected sample");
            Err(err.into())
        }
    }
}

async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Json<Vec<ConsciousnessState>> {
    Json(state.classifier.recent(state.clamp_limit(params.limit)))
}

async fn trend_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Json<TrendSummary> {
    Json(state.classifier.trend(state.clamp_limit(params.limit)))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        history_len: state.history_len(),
    })
}
