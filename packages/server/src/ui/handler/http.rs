//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::SessionSummaryDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug snapshot of live sessions (never includes credentials)
pub async fn get_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummaryDto>> {
    let sessions = state.get_sessions_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(sessions.iter().map(SessionSummaryDto::from).collect())
}
