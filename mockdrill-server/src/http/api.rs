//! Interview and health REST handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use mockdrill_core::{
    Evaluation, InterviewSummary, NextQuestion, SessionSnapshot, StartRequest,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of active sessions
    pub active_sessions: usize,
}

/// Health check endpoint
///
/// Returns server status, version, uptime, and active session count.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let active_sessions = state.session_manager.session_count().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        active_sessions,
    })
}

/// POST /api/v1/interview/start - Start a new interview session
///
/// Resolves the question bank (ingested store first, then the external bank,
/// demo set on any failure) and creates the session.
pub async fn start_interview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let bank = state
        .questions_for(request.question_bank_id.as_deref())
        .await;
    let snapshot = state.session_manager.create_session(request, bank).await?;
    Ok(Json(snapshot))
}

/// Request body for fetching the next question
#[derive(Debug, Serialize, Deserialize)]
pub struct NextQuestionRequest {
    pub session_id: String,
    /// Answer to the current question, recorded before advancing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_answer: Option<String>,
}

/// POST /api/v1/interview/next-question - Advance the interview
pub async fn next_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NextQuestionRequest>,
) -> Result<Json<NextQuestion>, ApiError> {
    let next = state
        .session_manager
        .next_question(&request.session_id, request.previous_answer.as_deref())
        .await?;
    Ok(Json(next))
}

/// Request body for evaluating an answer
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub session_id: String,
    pub question_id: String,
    pub answer: String,
}

/// POST /api/v1/interview/evaluate - Score an answer
pub async fn evaluate_response(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, ApiError> {
    let evaluation = state
        .session_manager
        .record_answer(&request.session_id, &request.question_id, &request.answer)
        .await?;
    Ok(Json(evaluation))
}

/// Request body for completing an interview
#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub session_id: String,
}

/// POST /api/v1/interview/complete - Complete the interview and summarize
pub async fn complete_interview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompleteRequest>,
) -> Result<Json<InterviewSummary>, ApiError> {
    let summary = state
        .session_manager
        .complete_session(&request.session_id)
        .await?;
    Ok(Json(summary))
}

/// GET /api/v1/interview/session/{id} - Get session details
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let snapshot = state.session_manager.get_session(&session_id).await?;
    Ok(Json(snapshot))
}
