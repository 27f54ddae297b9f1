//! Session struct and state machine
//!
//! A session owns its fixed question list and append-only response history.
//! Lifecycle is InProgress -> Completed with no way back; a completed session
//! is immutable except for reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::evaluator::{self, Evaluation};
use crate::question::{Difficulty, QuestionRecord, UserContext};
use crate::selector;
use crate::summary::InterviewSummary;

/// State of a session
///
/// Creation and in-progress are merged: nothing observable distinguishes a
/// freshly created session from one whose first question has not been served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Questions are being served and answers recorded
    InProgress,
    /// Terminal; summary is frozen
    Completed,
}

/// Parameters for creating a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    /// Bank to draw questions from; None selects the built-in demo set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_bank_id: Option<String>,
    /// Target difficulty; selection widens to the adjacent band
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Requested question count; actual count is min(requested, available)
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
    /// Choose the next question adaptively from running performance
    #[serde(default = "default_true")]
    pub enable_adaptive: bool,
    /// Permit best-effort feedback enhancement by an external provider
    #[serde(default)]
    pub use_enhancement: bool,
    /// Free-text candidate hints for relevance ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

fn default_num_questions() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for StartRequest {
    fn default() -> Self {
        Self {
            question_bank_id: None,
            difficulty: Difficulty::default(),
            num_questions: default_num_questions(),
            enable_adaptive: true,
            use_enhancement: false,
            user_context: None,
        }
    }
}

/// One recorded answer, immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question_id: String,
    pub answer: String,
    pub score: f64,
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
}

/// A question served to the candidate with its position in the interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestion {
    pub question: QuestionRecord,
    /// 1-based position of this question
    pub question_number: usize,
    pub total_questions: usize,
}

/// Read-only wire view of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub state: SessionState,
    pub difficulty: Difficulty,
    pub num_questions: usize,
    pub current_question_index: usize,
    pub questions: Vec<QuestionRecord>,
    pub responses: Vec<ResponseRecord>,
    pub score: f64,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// One interview session
///
/// Invariants, held at every point:
/// - `0 <= cursor <= questions.len()`
/// - `responses.len() <= cursor`
/// - `score` is the arithmetic mean of all recorded response scores (0 if none)
pub struct Session {
    id: String,
    difficulty: Difficulty,
    num_questions: usize,
    questions: Vec<QuestionRecord>,
    cursor: usize,
    responses: Vec<ResponseRecord>,
    score: f64,
    adaptive: bool,
    enhance: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    summary: Option<InterviewSummary>,
}

impl Session {
    /// Create a session over an already-selected question list
    pub fn new(id: impl Into<String>, request: &StartRequest, questions: Vec<QuestionRecord>) -> Self {
        Self {
            id: id.into(),
            difficulty: request.difficulty,
            num_questions: request.num_questions,
            questions,
            cursor: 0,
            responses: Vec::new(),
            score: 0.0,
            adaptive: request.enable_adaptive,
            enhance: request.use_enhancement,
            started_at: Utc::now(),
            completed_at: None,
            summary: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        if self.completed_at.is_some() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Running mean score over all recorded responses
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True when enhancement by an external provider is permitted
    pub fn enhancement_enabled(&self) -> bool {
        self.enhance
    }

    /// Questions not yet answered, in original selection order
    pub fn remaining(&self) -> Vec<QuestionRecord> {
        self.questions
            .iter()
            .filter(|q| !self.has_response_for(&q.id))
            .cloned()
            .collect()
    }

    /// True when a response is already recorded for the question
    pub fn has_response_for(&self, question_id: &str) -> bool {
        self.responses.iter().any(|r| r.question_id == question_id)
    }

    /// Serve the next question and advance the cursor by exactly one
    ///
    /// In adaptive mode the question is chosen from the remaining unanswered
    /// subset by running performance; otherwise it is the positional read at
    /// the cursor.
    pub fn advance(&mut self) -> Result<NextQuestion, SessionError> {
        if self.state() == SessionState::Completed || self.cursor >= self.questions.len() {
            return Err(SessionError::InterviewComplete);
        }

        let question = if self.adaptive {
            let remaining = self.remaining();
            let mean = if self.responses.is_empty() {
                None
            } else {
                Some(self.score)
            };
            selector::select_adaptive(&remaining, mean)
                .cloned()
                .ok_or(SessionError::InterviewComplete)?
        } else {
            self.questions[self.cursor].clone()
        };

        self.cursor += 1;

        Ok(NextQuestion {
            question,
            question_number: self.cursor,
            total_questions: self.questions.len(),
        })
    }

    /// The question served before the current cursor position, if any
    ///
    /// Target of the retroactive evaluation triggered by a `previous_answer`.
    pub fn previous_question(&self) -> Option<&QuestionRecord> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.questions.get(idx))
    }

    /// Evaluate an answer and append the response record
    ///
    /// Idempotent: a question that already has a recorded response is never
    /// double-recorded; the evaluation of the originally stored answer is
    /// returned instead, so the recorded score stands. The running mean is
    /// recomputed over all appended records.
    pub fn record_response(
        &mut self,
        question_id: &str,
        answer: &str,
    ) -> Result<Evaluation, SessionError> {
        if self.state() == SessionState::Completed {
            return Err(SessionError::InterviewComplete);
        }

        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .cloned()
            .ok_or_else(|| SessionError::QuestionNotInSession {
                session_id: self.id.clone(),
                question_id: question_id.to_string(),
            })?;

        if let Some(existing) = self.responses.iter().find(|r| r.question_id == question_id) {
            tracing::debug!(
                session_id = %self.id,
                question_id,
                "response already recorded, returning existing evaluation"
            );
            return Ok(evaluator::evaluate(&question, &existing.answer.clone()));
        }

        let evaluation = evaluator::evaluate(&question, answer);

        self.responses.push(ResponseRecord {
            question_id: question_id.to_string(),
            answer: answer.to_string(),
            score: evaluation.score,
            feedback: evaluation.feedback.clone(),
            timestamp: Utc::now(),
        });

        // Cursor cannot trail the response count: retroactive evaluation may
        // land before the next serve, so pull the cursor along.
        if self.responses.len() > self.cursor {
            self.cursor = self.responses.len();
        }

        let total: f64 = self.responses.iter().map(|r| r.score).sum();
        self.score = total / self.responses.len() as f64;

        Ok(evaluation)
    }

    /// Append externally produced insight to the stored feedback for a question
    ///
    /// Strictly additive; the recorded score is never touched. A completed
    /// session is frozen, so a late insight arriving after completion is
    /// silently dropped.
    pub fn append_feedback(&mut self, question_id: &str, insight: &str) {
        if self.state() == SessionState::Completed {
            return;
        }
        if let Some(record) = self
            .responses
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            record.feedback.push_str("\n\nAI Insight: ");
            record.feedback.push_str(insight);
        }
    }

    /// Stamp completion once; repeat calls keep the first timestamp
    pub fn mark_completed(&mut self) -> DateTime<Utc> {
        *self.completed_at.get_or_insert_with(Utc::now)
    }

    pub fn cached_summary(&self) -> Option<&InterviewSummary> {
        self.summary.as_ref()
    }

    pub fn cache_summary(&mut self, summary: InterviewSummary) {
        self.summary = Some(summary);
    }

    /// Read-only snapshot for wire responses
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            state: self.state(),
            difficulty: self.difficulty,
            num_questions: self.num_questions,
            current_question_index: self.cursor,
            questions: self.questions.clone(),
            responses: self.responses.clone(),
            score: self.score,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}
