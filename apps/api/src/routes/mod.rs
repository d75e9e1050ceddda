pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::learning::handlers as learning;
use crate::state::AppState;
use crate::store::handlers as results;
use crate::templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(analysis::handle_analyze))
        .route(
            "/api/v1/analyses/upload",
            post(analysis::handle_analyze_upload),
        )
        // Saved results API
        .route(
            "/api/v1/results",
            get(results::handle_list_results).post(results::handle_save_result),
        )
        .route(
            "/api/v1/results/export",
            get(results::handle_export_results),
        )
        .route("/api/v1/results/:id", delete(results::handle_delete_result))
        .route(
            "/api/v1/results/:id/export",
            get(results::handle_export_result),
        )
        // Learning resources
        .route("/api/v1/learning", post(learning::handle_learning_for_missing))
        .route("/api/v1/learning/:skill", get(learning::handle_skill_videos))
        // Job templates
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/:name",
            get(templates::handle_get_template),
        )
        .with_state(state)
}
