use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::landing::element::{ElementKind, Payload};
use crate::landing::store::{LayoutElement, MountOutcome};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MountRequest {
    pub kind: ElementKind,
}

#[derive(Serialize)]
pub struct MountResponse {
    pub outcome: MountOutcome,
    pub element: LayoutElement,
}

/// GET /api/v1/layout
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<LayoutElement>> {
    Json(state.layout.read().await.snapshot())
}

/// GET /api/v1/layout/elements/:id
pub async fn handle_get_element(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LayoutElement>, AppError> {
    let store = state.layout.read().await;
    let payload = store
        .read(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Layout element {id} not found")))?;
    Ok(Json(LayoutElement { id, payload }))
}

/// POST /api/v1/layout/elements/:id/mount
pub async fn handle_mount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MountRequest>,
) -> Result<Json<MountResponse>, AppError> {
    let (outcome, payload) = state.layout.write().await.mount(&id, req.kind)?;
    Ok(Json(MountResponse {
        outcome,
        element: LayoutElement { id, payload },
    }))
}

/// PUT /api/v1/layout/elements/:id
pub async fn handle_commit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Payload>,
) -> Result<Json<LayoutElement>, AppError> {
    state.layout.write().await.commit(&id, payload.clone())?;
    Ok(Json(LayoutElement { id, payload }))
}
