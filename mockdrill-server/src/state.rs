//! Shared application state for the mockdrill server

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockdrill_core::{QuestionBank, QuestionRecord, RemoteBank, SessionManager, demo_questions};
use tokio::sync::RwLock;

/// A question bank ingested through the admin surface
#[derive(Debug, Clone)]
pub struct IngestedBank {
    pub id: String,
    pub name: String,
    pub category: String,
    pub questions: Vec<QuestionRecord>,
    pub synced_at: DateTime<Utc>,
}

/// In-memory store for admin-fed question banks
#[derive(Default)]
pub struct IngestedStore {
    pub banks: Vec<IngestedBank>,
    pub total_feeds: u64,
    pub last_feed: Option<DateTime<Utc>>,
}

impl IngestedStore {
    /// Question count across all ingested banks
    pub fn total_questions(&self) -> usize {
        self.banks.iter().map(|b| b.questions.len()).sum()
    }

    /// Bank and question counts per category, in category order
    pub fn category_breakdown(&self) -> BTreeMap<String, (usize, usize)> {
        let mut breakdown: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for bank in &self.banks {
            let entry = breakdown.entry(bank.category.clone()).or_default();
            entry.0 += 1;
            entry.1 += bank.questions.len();
        }
        breakdown
    }
}

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Session manager for interview sessions
    pub session_manager: Arc<SessionManager>,
    /// External question bank used when no ingested bank matches
    pub bank: Arc<dyn QuestionBank>,
    /// Admin-fed question banks
    pub ingested: Arc<RwLock<IngestedStore>>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

/// Bank that only knows the built-in demo set
struct DemoBank;

#[async_trait::async_trait]
impl QuestionBank for DemoBank {
    async fn fetch(
        &self,
        _bank_id: Option<&str>,
    ) -> Result<Vec<QuestionRecord>, mockdrill_core::BankError> {
        Ok(demo_questions())
    }
}

impl AppState {
    /// Create a new AppState backed by the built-in demo bank
    pub fn new() -> Self {
        Self::with_bank(Arc::new(DemoBank))
    }

    /// Create an AppState backed by a remote question-bank API
    pub fn with_remote_bank(base_url: String) -> Self {
        Self::with_bank(Arc::new(RemoteBank::new(base_url)))
    }

    /// Create AppState with a custom bank (for testing)
    pub fn with_bank(bank: Arc<dyn QuestionBank>) -> Self {
        Self {
            session_manager: Arc::new(SessionManager::new()),
            bank,
            ingested: Arc::new(RwLock::new(IngestedStore::default())),
            started_at: Utc::now(),
        }
    }

    /// Resolve questions for a session start
    ///
    /// Ingested banks take priority over the external bank; any bank failure
    /// falls back to the demo set.
    pub async fn questions_for(&self, bank_id: Option<&str>) -> Vec<QuestionRecord> {
        if let Some(id) = bank_id {
            let store = self.ingested.read().await;
            if let Some(bank) = store.banks.iter().find(|b| b.id == id) {
                return bank.questions.clone();
            }
        }
        self.bank.fetch_or_demo(bank_id).await
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new();
        assert!(state.uptime_seconds() >= 0);
    }

    #[tokio::test]
    async fn test_questions_for_prefers_ingested_bank() {
        let state = AppState::new();
        let mut question = demo_questions().remove(0);
        question.id = "custom-1".to_string();
        state.ingested.write().await.banks.push(IngestedBank {
            id: "bank-1".to_string(),
            name: "Custom".to_string(),
            category: "Programming".to_string(),
            questions: vec![question],
            synced_at: Utc::now(),
        });

        let questions = state.questions_for(Some("bank-1")).await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "custom-1");
    }

    #[tokio::test]
    async fn test_questions_for_falls_back_to_bank() {
        let state = AppState::new();
        let questions = state.questions_for(Some("unknown")).await;
        assert_eq!(questions.len(), demo_questions().len());
    }

    #[tokio::test]
    async fn test_questions_for_without_bank_id_uses_demo_set() {
        let state = AppState::new();
        let questions = state.questions_for(None).await;
        assert_eq!(questions.len(), demo_questions().len());
    }

    #[test]
    fn test_category_breakdown_counts_banks_and_questions() {
        let mut store = IngestedStore::default();
        store.banks.push(IngestedBank {
            id: "b1".to_string(),
            name: "One".to_string(),
            category: "Java".to_string(),
            questions: demo_questions(),
            synced_at: Utc::now(),
        });
        store.banks.push(IngestedBank {
            id: "b2".to_string(),
            name: "Two".to_string(),
            category: "Java".to_string(),
            questions: vec![],
            synced_at: Utc::now(),
        });

        let breakdown = store.category_breakdown();
        assert_eq!(breakdown["Java"], (2, demo_questions().len()));
    }
}
