//! QuestionBank adapter trait and implementations
//!
//! The engine never mutates a bank; it reads an ordered question list once per
//! session. A bank fetch that fails or times out degrades to the built-in demo
//! set instead of surfacing an error.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BankError;

use super::{Difficulty, QuestionRecord};

const REMOTE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Supplies an ordered, finite sequence of question records
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch the questions for a bank, or the default bank when `bank_id` is None
    async fn fetch(&self, bank_id: Option<&str>) -> Result<Vec<QuestionRecord>, BankError>;

    /// Fetch with fallback: any failure or empty bank id yields the demo set
    async fn fetch_or_demo(&self, bank_id: Option<&str>) -> Vec<QuestionRecord> {
        if bank_id.is_none() {
            return demo_questions();
        }
        match self.fetch(bank_id).await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                tracing::warn!(?bank_id, "question bank empty, using demo set");
                demo_questions()
            }
            Err(e) => {
                tracing::warn!(?bank_id, error = %e, "question bank fetch failed, using demo set");
                demo_questions()
            }
        }
    }
}

/// In-memory bank backed by a fixed question list
///
/// Used by tests and by the server's ingestion surface.
#[derive(Debug, Clone, Default)]
pub struct StaticBank {
    questions: Vec<QuestionRecord>,
}

impl StaticBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionBank for StaticBank {
    async fn fetch(&self, _bank_id: Option<&str>) -> Result<Vec<QuestionRecord>, BankError> {
        Ok(self.questions.clone())
    }
}

/// Bank backed by a host question-bank HTTP API
///
/// Expects `GET {base_url}/question-bank/{id}/questions` returning a JSON
/// array of question records.
pub struct RemoteBank {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteBank {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuestionBank for RemoteBank {
    async fn fetch(&self, bank_id: Option<&str>) -> Result<Vec<QuestionRecord>, BankError> {
        let bank_id = bank_id.ok_or_else(|| BankError::NotFound("no bank id".to_string()))?;
        let url = format!("{}/question-bank/{}/questions", self.base_url, bank_id);

        let response = self
            .client
            .get(&url)
            .timeout(REMOTE_FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let questions: Vec<QuestionRecord> = response
            .json()
            .await
            .map_err(|e| BankError::Malformed(e.to_string()))?;

        tracing::debug!(bank_id, count = questions.len(), "fetched question bank");
        Ok(questions)
    }
}

/// The fixed built-in demo set used when no bank is supplied or a fetch fails
pub fn demo_questions() -> Vec<QuestionRecord> {
    vec![
        QuestionRecord {
            id: "q1".to_string(),
            text: "What is Object-Oriented Programming and what are its main principles?"
                .to_string(),
            category: "Programming Fundamentals".to_string(),
            difficulty: Difficulty::Easy,
            expected_answer: Some(
                "OOP is a programming paradigm based on objects. Main principles: \
                 Encapsulation, Inheritance, Polymorphism, Abstraction."
                    .to_string(),
            ),
            tags: Some(vec![
                "oop".to_string(),
                "fundamentals".to_string(),
                "programming".to_string(),
            ]),
            hints: None,
        },
        QuestionRecord {
            id: "q2".to_string(),
            text: "Explain the difference between ArrayList and LinkedList in Java.".to_string(),
            category: "Data Structures".to_string(),
            difficulty: Difficulty::Medium,
            expected_answer: Some(
                "ArrayList uses dynamic array, O(1) access, O(n) insertion. LinkedList \
                 uses doubly-linked nodes, O(n) access, O(1) insertion at ends."
                    .to_string(),
            ),
            tags: Some(vec![
                "java".to_string(),
                "collections".to_string(),
                "data-structures".to_string(),
            ]),
            hints: None,
        },
        QuestionRecord {
            id: "q3".to_string(),
            text: "Design a URL shortening service like bit.ly. Explain your approach.".to_string(),
            category: "System Design".to_string(),
            difficulty: Difficulty::Hard,
            expected_answer: Some(
                "Hash function for URLs, database with key-value store, redirect service, \
                 analytics, handle collisions, scale with sharding."
                    .to_string(),
            ),
            tags: Some(vec![
                "system-design".to_string(),
                "architecture".to_string(),
                "scalability".to_string(),
            ]),
            hints: None,
        },
        QuestionRecord {
            id: "q4".to_string(),
            text: "What is a REST API and what are its constraints?".to_string(),
            category: "Web Development".to_string(),
            difficulty: Difficulty::Easy,
            expected_answer: Some(
                "REST is architectural style for web services. Constraints: Client-server, \
                 stateless, cacheable, uniform interface, layered system."
                    .to_string(),
            ),
            tags: Some(vec![
                "rest".to_string(),
                "api".to_string(),
                "web".to_string(),
            ]),
            hints: None,
        },
        QuestionRecord {
            id: "q5".to_string(),
            text: "Explain how Spring Boot dependency injection works.".to_string(),
            category: "Java Frameworks".to_string(),
            difficulty: Difficulty::Medium,
            expected_answer: Some(
                "Spring Boot uses IoC container to inject dependencies via @Autowired, \
                 constructor injection, or setter injection. Manages bean lifecycle."
                    .to_string(),
            ),
            tags: Some(vec![
                "spring-boot".to_string(),
                "dependency-injection".to_string(),
                "java".to_string(),
            ]),
            hints: None,
        },
    ]
}
