//! Engine status handler

use axum::{extract::State, Json};

use afews_core::api::engine_status::EngineStatus;

use crate::AppState;

pub async fn get(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}
