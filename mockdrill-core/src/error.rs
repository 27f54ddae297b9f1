//! Error types for mockdrill-core

use thiserror::Error;

/// Top-level error type for mockdrill-core
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    #[error("Question bank error: {0}")]
    Bank(#[from] BankError),

    #[error("Enhancer error: {0}")]
    Enhancer(#[from] EnhancerError),
}

/// Errors related to session management
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Interview is already complete")]
    InterviewComplete,

    #[error("Question {question_id} is not part of session {session_id}")]
    QuestionNotInSession {
        session_id: String,
        question_id: String,
    },

    #[error("No usable questions available for the requested difficulty")]
    EmptyBank,
}

/// Errors from the summary generator
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Completion stamped before the session start. Indicates a clock or
    /// ordering bug upstream and must never be silently ignored.
    #[error("Negative session duration: completed {completed_at} before start {started_at}")]
    InvalidDuration {
        started_at: chrono::DateTime<chrono::Utc>,
        completed_at: chrono::DateTime<chrono::Utc>,
    },
}

/// Errors from question bank adapters
///
/// Callers recover from these with the built-in demo set; they never surface
/// as engine errors.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Question bank request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Question bank returned malformed data: {0}")]
    Malformed(String),

    #[error("Question bank not found: {0}")]
    NotFound(String),
}

/// Errors from external enhancement providers
///
/// Enhancement is best-effort; callers swallow these and keep the
/// deterministic evaluation untouched.
#[derive(Error, Debug)]
pub enum EnhancerError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Enhancement request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Enhancement timed out after {0} seconds")]
    Timeout(u64),

    #[error("Provider returned unexpected payload: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_not_found_displays_correctly() {
        let error = SessionError::NotFound("abc123".to_string());
        assert!(error.to_string().contains("Session not found"));
        assert!(error.to_string().contains("abc123"));
    }

    #[test]
    fn session_error_question_not_in_session_displays_correctly() {
        let error = SessionError::QuestionNotInSession {
            session_id: "s1".to_string(),
            question_id: "q9".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("q9"));
        assert!(text.contains("s1"));
    }

    #[test]
    fn summary_error_invalid_duration_displays_correctly() {
        let started_at = chrono::Utc::now();
        let completed_at = started_at - chrono::Duration::minutes(5);
        let error = SummaryError::InvalidDuration {
            started_at,
            completed_at,
        };
        assert!(error.to_string().contains("Negative session duration"));
    }

    #[test]
    fn enhancer_error_timeout_displays_correctly() {
        let error = EnhancerError::Timeout(5);
        assert!(error.to_string().contains("5 seconds"));
    }

    #[test]
    fn engine_error_converts_from_session_error() {
        let error: EngineError = SessionError::InterviewComplete.into();
        assert!(matches!(error, EngineError::Session(_)));
    }

    #[test]
    fn engine_error_converts_from_summary_error() {
        let now = chrono::Utc::now();
        let error: EngineError = SummaryError::InvalidDuration {
            started_at: now,
            completed_at: now - chrono::Duration::seconds(1),
        }
        .into();
        assert!(matches!(error, EngineError::Summary(_)));
    }
}
