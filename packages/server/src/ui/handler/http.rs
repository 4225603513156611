//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, ParticipantsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Currently joined participants
pub async fn list_participants(State(state): State<Arc<AppState>>) -> Json<ParticipantsDto> {
    let snapshot = state.list_participants_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(ParticipantsDto::from(snapshot))
}
