//! SessionManager: the process-wide session store
//!
//! Designed for a concurrent request-serving host. The outer map lock is held
//! only long enough to look up or insert a session handle; all session work
//! runs under a per-session mutex, so operations on different sessions never
//! contend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::enhancer::{Enhancer, NoopEnhancer};
use crate::error::{EngineError, EnhancerError, SessionError};
use crate::evaluator::Evaluation;
use crate::question::QuestionRecord;
use crate::selector;
use crate::summary::{self, InterviewSummary};

use super::state::{NextQuestion, Session, SessionSnapshot, SessionState, StartRequest};

/// Upper bound on a single enhancement call
const ENHANCEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Manages all interview sessions in the process
pub struct SessionManager {
    /// Session handles indexed by ID; the map lock guards only lookup and
    /// insertion, never session work
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    /// Optional external feedback decorator
    enhancer: Arc<dyn Enhancer>,
}

impl SessionManager {
    /// Create a manager with enhancement disabled
    pub fn new() -> Self {
        Self::with_enhancer(Arc::new(NoopEnhancer))
    }

    /// Create a manager with a specific enhancer implementation
    pub fn with_enhancer(enhancer: Arc<dyn Enhancer>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            enhancer,
        }
    }

    /// Create a new session from a fetched question bank
    ///
    /// The selector seeds the ordered question list with
    /// `min(num_questions, available)` entries. Fails with
    /// [`SessionError::EmptyBank`] when nothing usable survives filtering.
    pub async fn create_session(
        &self,
        request: StartRequest,
        bank: Vec<QuestionRecord>,
    ) -> Result<SessionSnapshot, SessionError> {
        let questions = selector::select_initial(
            &bank,
            request.difficulty,
            request.num_questions,
            request.user_context.as_ref(),
        );

        if questions.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), &request, questions);
        let snapshot = session.snapshot();

        tracing::info!(
            session_id = %id,
            difficulty = %request.difficulty,
            questions = snapshot.questions.len(),
            adaptive = request.enable_adaptive,
            "created interview session"
        );

        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));

        Ok(snapshot)
    }

    /// Serve the next question
    ///
    /// A supplied `previous_answer` is first recorded retroactively against
    /// the question served before the cursor; replays are idempotent and are
    /// never double-recorded.
    pub async fn next_question(
        &self,
        session_id: &str,
        previous_answer: Option<&str>,
    ) -> Result<NextQuestion, SessionError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;

        if let Some(answer) = previous_answer
            && let Some(previous) = session.previous_question().cloned()
            && !session.has_response_for(&previous.id)
        {
            let evaluation = session.record_response(&previous.id, answer)?;
            drop(session);
            self.enhance(&handle, &previous, answer, &evaluation).await;
            session = handle.lock().await;
        }

        session.advance()
    }

    /// Evaluate and record an answer for a question in the session
    pub async fn record_answer(
        &self,
        session_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<Evaluation, SessionError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;

        let already_recorded = session.has_response_for(question_id);
        let question = session
            .questions()
            .iter()
            .find(|q| q.id == question_id)
            .cloned();
        let mut evaluation = session.record_response(question_id, answer)?;
        drop(session);

        if !already_recorded
            && let Some(question) = question
        {
            if let Some(insight) = self.enhance(&handle, &question, answer, &evaluation).await {
                evaluation.feedback.push_str("\n\nAI Insight: ");
                evaluation.feedback.push_str(&insight);
            }
        }

        Ok(evaluation)
    }

    /// Complete the session and return its summary
    ///
    /// Idempotent: the first call stamps the completion timestamp and caches
    /// the summary; repeat calls return the identical cached summary.
    pub async fn complete_session(
        &self,
        session_id: &str,
    ) -> Result<InterviewSummary, EngineError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;

        if let Some(cached) = session.cached_summary() {
            return Ok(cached.clone());
        }

        session.mark_completed();
        let summary = summary::summarize(&session)?;
        session.cache_summary(summary.clone());

        tracing::info!(
            session_id,
            overall_score = summary.overall_score,
            answered = summary.questions_answered,
            "completed interview session"
        );

        Ok(summary)
    }

    /// Read-only snapshot of a session
    pub async fn get_session(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.snapshot())
    }

    /// List all session IDs
    pub async fn list_sessions(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// Remove a session
    ///
    /// Takes the per-session lock before dropping the handle so no reader
    /// observes a half-removed session.
    pub async fn remove_session(&self, session_id: &str) -> Result<(), SessionError> {
        let handle = {
            let mut sessions = self.sessions.write().await;
            sessions
                .remove(session_id)
                .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?
        };
        let _guard = handle.lock().await;
        Ok(())
    }

    /// Number of active sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn handle(&self, session_id: &str) -> Result<Arc<Mutex<Session>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Best-effort enhancement with a bounded timeout
    ///
    /// Any failure is swallowed; the deterministic evaluation and its score
    /// are never altered. Runs outside the session lock and re-acquires it
    /// only to append the insight to the stored feedback.
    async fn enhance(
        &self,
        handle: &Arc<Mutex<Session>>,
        question: &QuestionRecord,
        answer: &str,
        evaluation: &Evaluation,
    ) -> Option<String> {
        {
            let session = handle.lock().await;
            if !session.enhancement_enabled() {
                return None;
            }
        }

        let result = tokio::time::timeout(
            ENHANCEMENT_TIMEOUT,
            self.enhancer.enhance(question, answer, evaluation),
        )
        .await
        .unwrap_or(Err(EnhancerError::Timeout(ENHANCEMENT_TIMEOUT.as_secs())));

        match result {
            Ok(insight) if !insight.trim().is_empty() => {
                let mut session = handle.lock().await;
                if session.state() == SessionState::Completed {
                    // The session was completed while the call was in flight;
                    // its records are frozen now.
                    return None;
                }
                session.append_feedback(&question.id, &insight);
                Some(insight)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(question_id = %question.id, error = %e, "enhancement failed");
                None
            }
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
