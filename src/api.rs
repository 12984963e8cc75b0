// 🌐 REST API with Axum
// Thin HTTP layer over ReceiptService: JSON in, id/points/error JSON out

use crate::error::ReceiptError;
use crate::rules::Points;
use crate::service::ReceiptService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub service: Arc<ReceiptService>,
}

impl AppState {
    pub fn new(service: ReceiptService) -> Self {
        AppState {
            service: Arc::new(service),
        }
    }
}

// ============================================================================
// RESPONSE BODIES
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: Points,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        match self {
            ReceiptError::Validation(reason) => {
                error_response(StatusCode::BAD_REQUEST, reason.to_string())
            }
            ReceiptError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Receipt not found")
            }
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /receipts/process - Validate and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IdResponse>, Response> {
    let Json(raw) = body.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "unreadable receipt body");
        error_response(StatusCode::BAD_REQUEST, "Invalid JSON body")
    })?;

    let id = state.service.submit(&raw).map_err(IntoResponse::into_response)?;
    Ok(Json(IdResponse { id }))
}

/// GET /receipts/:id/points - Points for a stored receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ReceiptError> {
    let points = state.service.points(&id)?;
    Ok(Json(PointsResponse { points }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
