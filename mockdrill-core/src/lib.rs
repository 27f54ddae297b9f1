//! mockdrill-core: the interview session engine
//!
//! This crate runs adaptive practice interviews without calling any external
//! model. It provides:
//!
//! - **Question model** - [`QuestionRecord`], [`Difficulty`], and the
//!   [`QuestionBank`] adapter trait with static and remote implementations
//! - **Question selection** - difficulty banding, relevance ranking, category
//!   diversification, and adaptive reselection in [`selector`]
//! - **Response evaluation** - the deterministic lexical scorer in [`evaluator`]
//! - **Session management** - [`Session`] and [`SessionManager`] with
//!   per-session locking for concurrent hosts
//! - **Summaries** - category breakdowns and recommendations in [`summary`]
//! - **Optional enhancement** - the [`Enhancer`] trait for best-effort,
//!   never-blocking feedback decoration by an external provider
//!
//! # Quick Start
//!
//! ```no_run
//! use mockdrill_core::{Difficulty, SessionManager, StartRequest, question::demo_questions};
//!
//! # async fn example() -> Result<(), mockdrill_core::EngineError> {
//! let manager = SessionManager::new();
//! let request = StartRequest {
//!     difficulty: Difficulty::Medium,
//!     num_questions: 3,
//!     ..Default::default()
//! };
//! let session = manager.create_session(request, demo_questions()).await?;
//! let next = manager.next_question(&session.session_id, None).await?;
//! println!("Q{}/{}: {}", next.question_number, next.total_questions, next.question.text);
//! # Ok(())
//! # }
//! ```

pub mod enhancer;
pub mod error;
pub mod evaluator;
pub mod question;
pub mod selector;
pub mod session;
pub mod summary;

// Re-export key types for convenience
pub use enhancer::{ChatCompletionEnhancer, Enhancer, EnhancerConfig, NoopEnhancer, Provider};
pub use error::{BankError, EngineError, EnhancerError, SessionError, SummaryError};
pub use evaluator::{Evaluation, evaluate};
pub use question::{
    Difficulty, QuestionBank, QuestionRecord, RemoteBank, StaticBank, UserContext, demo_questions,
};
pub use selector::{FallbackPicker, select_adaptive, select_initial};
pub use session::{
    NextQuestion, ResponseRecord, Session, SessionManager, SessionSnapshot, SessionState,
    StartRequest,
};
pub use summary::InterviewSummary;
