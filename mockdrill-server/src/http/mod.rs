//! HTTP server module

mod admin;
mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::AppState;

pub use admin::{FeedQuestionsRequest, FeedQuestionsResponse, StatsResponse};
pub use api::{CompleteRequest, EvaluateRequest, HealthResponse, NextQuestionRequest};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/v1/interview/start", post(api::start_interview))
        .route("/api/v1/interview/next-question", post(api::next_question))
        .route("/api/v1/interview/evaluate", post(api::evaluate_response))
        .route("/api/v1/interview/complete", post(api::complete_interview))
        .route("/api/v1/interview/session/:id", get(api::get_session))
        .route("/api/v1/admin/feed-questions", post(admin::feed_questions))
        .route("/api/v1/admin/stats", get(admin::stats))
        .route("/api/v1/admin/clear", delete(admin::clear))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
