//! Admin and data-ingestion handlers
//!
//! Ingested banks live in memory and take priority over the external
//! question-bank API when a session starts with a matching bank id.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use mockdrill_core::QuestionRecord;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::state::IngestedBank;

/// One question bank in a feed request
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedBank {
    pub id: String,
    pub name: String,
    pub category: String,
    pub questions: Vec<QuestionRecord>,
}

/// Request body for feeding question banks into the server
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedQuestionsRequest {
    pub banks: Vec<FeedBank>,
}

/// Response for a feed request
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedQuestionsResponse {
    pub processed_banks: usize,
    pub total_questions: usize,
    pub message: String,
}

/// POST /api/v1/admin/feed-questions - Ingest question banks
///
/// A bank with an already-known id replaces the stored one.
pub async fn feed_questions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedQuestionsRequest>,
) -> Json<FeedQuestionsResponse> {
    let mut store = state.ingested.write().await;
    let mut processed_banks = 0;
    let mut total_questions = 0;

    for bank in request.banks {
        total_questions += bank.questions.len();
        processed_banks += 1;

        store.banks.retain(|b| b.id != bank.id);
        store.banks.push(IngestedBank {
            id: bank.id,
            name: bank.name,
            category: bank.category,
            questions: bank.questions,
            synced_at: Utc::now(),
        });
    }

    store.total_feeds += 1;
    store.last_feed = Some(Utc::now());

    tracing::info!(processed_banks, total_questions, "ingested question banks");

    Json(FeedQuestionsResponse {
        processed_banks,
        total_questions,
        message: format!(
            "Processed {} question banks with {} questions",
            processed_banks, total_questions
        ),
    })
}

/// Per-category ingestion counts
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryStats {
    pub banks: usize,
    pub questions: usize,
}

/// Response for the stats endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_feeds: u64,
    pub total_banks: usize,
    pub total_questions: usize,
    pub categories: BTreeMap<String, CategoryStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_feed: Option<DateTime<Utc>>,
    pub active_sessions: usize,
}

/// GET /api/v1/admin/stats - Ingestion and session statistics
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let store = state.ingested.read().await;
    let categories = store
        .category_breakdown()
        .into_iter()
        .map(|(category, (banks, questions))| (category, CategoryStats { banks, questions }))
        .collect();

    Json(StatsResponse {
        total_feeds: store.total_feeds,
        total_banks: store.banks.len(),
        total_questions: store.total_questions(),
        categories,
        last_feed: store.last_feed,
        active_sessions: state.session_manager.session_count().await,
    })
}

/// Response for the clear endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared_banks: usize,
    pub message: String,
}

/// DELETE /api/v1/admin/clear - Drop all ingested data
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    let mut store = state.ingested.write().await;
    let cleared_banks = store.banks.len();
    *store = Default::default();

    tracing::info!(cleared_banks, "cleared ingested question banks");

    Json(ClearResponse {
        cleared_banks,
        message: "All ingested data cleared".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use mockdrill_core::demo_questions;
    use serde_json::json;

    use crate::http::create_router;

    fn test_server() -> TestServer {
        let state = Arc::new(AppState::new());
        TestServer::new(create_router(state)).unwrap()
    }

    fn feed_body() -> serde_json::Value {
        json!({
            "banks": [{
                "id": "bank-1",
                "name": "Java Basics",
                "category": "Java",
                "questions": demo_questions(),
            }]
        })
    }

    #[tokio::test]
    async fn test_feed_questions_reports_counts() {
        let server = test_server();

        let response = server
            .post("/api/v1/admin/feed-questions")
            .json(&feed_body())
            .await;
        response.assert_status_ok();
        let body = response.json::<FeedQuestionsResponse>();
        assert_eq!(body.processed_banks, 1);
        assert_eq!(body.total_questions, demo_questions().len());
    }

    #[tokio::test]
    async fn test_feed_replaces_bank_with_same_id() {
        let server = test_server();

        server
            .post("/api/v1/admin/feed-questions")
            .json(&feed_body())
            .await
            .assert_status_ok();
        server
            .post("/api/v1/admin/feed-questions")
            .json(&json!({
                "banks": [{
                    "id": "bank-1",
                    "name": "Java Basics v2",
                    "category": "Java",
                    "questions": [demo_questions().remove(0)],
                }]
            }))
            .await
            .assert_status_ok();

        let stats = server.get("/api/v1/admin/stats").await.json::<StatsResponse>();
        assert_eq!(stats.total_banks, 1);
        assert_eq!(stats.total_questions, 1);
        assert_eq!(stats.total_feeds, 2);
    }

    #[tokio::test]
    async fn test_stats_breaks_down_categories() {
        let server = test_server();
        server
            .post("/api/v1/admin/feed-questions")
            .json(&feed_body())
            .await
            .assert_status_ok();

        let stats = server.get("/api/v1/admin/stats").await.json::<StatsResponse>();
        assert_eq!(stats.categories["Java"].banks, 1);
        assert_eq!(stats.categories["Java"].questions, demo_questions().len());
        assert!(stats.last_feed.is_some());
    }

    #[tokio::test]
    async fn test_clear_empties_the_store() {
        let server = test_server();
        server
            .post("/api/v1/admin/feed-questions")
            .json(&feed_body())
            .await
            .assert_status_ok();

        let cleared = server
            .delete("/api/v1/admin/clear")
            .await
            .json::<ClearResponse>();
        assert_eq!(cleared.cleared_banks, 1);

        let stats = server.get("/api/v1/admin/stats").await.json::<StatsResponse>();
        assert_eq!(stats.total_banks, 0);
        assert_eq!(stats.total_feeds, 0);
    }

    #[tokio::test]
    async fn test_ingested_bank_feeds_interview_start() {
        let server = test_server();
        server
            .post("/api/v1/admin/feed-questions")
            .json(&feed_body())
            .await
            .assert_status_ok();

        let response = server
            .post("/api/v1/interview/start")
            .json(&json!({
                "question_bank_id": "bank-1",
                "difficulty": "medium",
                "num_questions": 3,
            }))
            .await;
        response.assert_status_ok();
    }
}
