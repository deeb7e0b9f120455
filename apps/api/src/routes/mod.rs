pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::landing::handlers as layout;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume wizard
        .route("/api/v1/wizards", post(wizard::handle_create))
        .route("/api/v1/wizards/:id", get(wizard::handle_get))
        .route("/api/v1/wizards/:id/form", put(wizard::handle_update_form))
        .route("/api/v1/wizards/:id/next", post(wizard::handle_next))
        .route("/api/v1/wizards/:id/back", post(wizard::handle_back))
        .route("/api/v1/wizards/:id/reset", post(wizard::handle_reset))
        .route("/api/v1/wizards/:id/finish", post(wizard::handle_finish))
        .route("/api/v1/wizards/:id/output", get(wizard::handle_output))
        .route("/api/v1/wizards/:id/preview", get(wizard::handle_preview))
        // Landing builder layout store
        .route("/api/v1/layout", get(layout::handle_list))
        .route(
            "/api/v1/layout/elements/:id",
            get(layout::handle_get_element).put(layout::handle_commit),
        )
        .route(
            "/api/v1/layout/elements/:id/mount",
            post(layout::handle_mount),
        )
        .with_state(state)
}
