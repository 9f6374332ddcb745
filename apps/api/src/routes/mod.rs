pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        .route("/api/v1/resumes/:id/pdf", get(resumes::handle_export_pdf))
        // AI API
        .route("/api/v1/ai/suggestions", post(suggestions::handle_suggestions))
        .route(
            "/api/v1/ai/content-suggestions",
            post(suggestions::handle_content_suggestions),
        )
        .route(
            "/api/v1/ai/job-analysis",
            post(suggestions::handle_job_analysis),
        )
        .with_state(state)
}
