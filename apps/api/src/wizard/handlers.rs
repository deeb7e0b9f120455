use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::models::output::NormalizedOutput;
use crate::state::AppState;
use crate::submission::render_preview_md;
use crate::wizard::controller::AdvanceOutcome;
use crate::wizard::WizardView;

#[derive(Serialize)]
pub struct StepResponse {
    pub result: AdvanceOutcome,
    pub wizard: WizardView,
}

#[derive(Serialize)]
pub struct FinishResponse {
    pub result: AdvanceOutcome,
    pub output: Option<NormalizedOutput>,
    pub wizard: WizardView,
}

/// POST /api/v1/wizards
pub async fn handle_create(State(state): State<AppState>) -> (StatusCode, Json<WizardView>) {
    let session = state.wizards.create().await;
    (StatusCode::CREATED, Json(session.view().await))
}

/// GET /api/v1/wizards/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let session = state.wizards.get(id).await?;
    Ok(Json(session.view().await))
}

/// PUT /api/v1/wizards/:id/form
pub async fn handle_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<FormState>,
) -> Result<Json<WizardView>, AppError> {
    let session = state.wizards.get(id).await?;
    session.update_form(form).await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/wizards/:id/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StepResponse>, AppError> {
    let session = state.wizards.get(id).await?;
    let result = session.next().await?;
    Ok(Json(StepResponse {
        result,
        wizard: session.view().await,
    }))
}

/// POST /api/v1/wizards/:id/back
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let session = state.wizards.get(id).await?;
    session.back().await?;
    Ok(Json(session.view().await))
}

/// POST /api/v1/wizards/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let session = state.wizards.get(id).await?;
    session.reset().await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/wizards/:id/finish
pub async fn handle_finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinishResponse>, AppError> {
    let session = state.wizards.get(id).await?;
    let result = session.finish(state.sink.as_ref()).await?;
    Ok(Json(FinishResponse {
        result,
        output: session.output().await,
        wizard: session.view().await,
    }))
}

/// GET /api/v1/wizards/:id/output
pub async fn handle_output(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NormalizedOutput>, AppError> {
    let session = state.wizards.get(id).await?;
    let output = session
        .output()
        .await
        .ok_or_else(|| AppError::NotFound(format!("Wizard {id} has not been finished")))?;
    Ok(Json(output))
}

/// GET /api/v1/wizards/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.wizards.get(id).await?;
    let output = session
        .output()
        .await
        .ok_or_else(|| AppError::NotFound(format!("Wizard {id} has not been finished")))?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_preview_md(&output),
    ))
}
