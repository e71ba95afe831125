pub mod catalog;
pub mod exports;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalogue and form support
        .route("/api/v1/templates", get(catalog::handle_list_templates))
        .route("/api/v1/templates/:id", get(catalog::handle_get_template))
        .route("/api/v1/profile/sample", get(catalog::handle_sample_profile))
        .route("/api/v1/profile/edit", post(catalog::handle_edit_profile))
        // Document generation
        .route("/api/v1/render/:target", post(exports::handle_render))
        .route("/api/v1/layout", post(exports::handle_layout))
        .route("/api/v1/layout/pages", post(exports::handle_page_estimates))
        .route("/api/v1/exports", post(exports::handle_exports))
        .with_state(state)
}
