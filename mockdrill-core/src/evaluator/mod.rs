//! Deterministic response evaluation
//!
//! Scores a free-text answer against a question with additive lexical
//! heuristics: length, keyword overlap with the reference answer, relevance
//! to the question, structural cues, and technical depth. No external calls;
//! the same (question, answer) pair always yields the identical result.

mod text;

use serde::{Deserialize, Serialize};

use crate::question::QuestionRecord;

pub use text::{detect_technical_terms, extract_keywords, is_technical_category};

/// Score at or above which an answer counts as acceptable
pub const ACCEPTABLE_SCORE: f64 = 60.0;

/// Markers signalling the answer gives examples
const EXAMPLE_MARKERS: &[&str] = &["example", "for instance", "such as", "like"];

/// Causal connectives signalling explicit reasoning
const REASONING_MARKERS: &[&str] = &["because", "therefore", "thus", "hence", "so"];

/// Result of evaluating one answer
///
/// Pure function output; the session state machine is responsible for
/// recording it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Question the answer was scored against
    pub question_id: String,
    /// Final score, clamped to [0, 100]
    pub score: f64,
    /// Whether the score clears [`ACCEPTABLE_SCORE`]
    pub is_acceptable: bool,
    /// Heuristic confidence in the score, in [0, 1]
    pub confidence: f64,
    /// Generated feedback text
    pub feedback: String,
    /// Up to 3 strengths, earliest-computed first
    pub strengths: Vec<String>,
    /// Up to 3 improvement notes, earliest-computed first
    pub improvements: Vec<String>,
    /// Up to 3 suggested resources, populated only below the acceptable bar
    pub suggested_resources: Vec<String>,
}

/// Evaluate a free-text answer against a question
pub fn evaluate(question: &QuestionRecord, answer: &str) -> Evaluation {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Evaluation {
            question_id: question.id.clone(),
            score: 0.0,
            is_acceptable: false,
            confidence: 1.0,
            feedback: "No answer provided.".to_string(),
            strengths: vec![],
            improvements: vec!["Please provide an answer to the question.".to_string()],
            suggested_resources: vec![],
        };
    }

    let answer_lower = trimmed.to_lowercase();
    let mut score = 0.0;
    let mut confidence = 0.8;
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    // 1. Length: reward focused answers, nudge rambling or terse ones
    let word_count = answer_lower.split_whitespace().count();
    if word_count < 10 {
        improvements.push("Provide more detailed explanation".to_string());
        score -= 10.0;
    } else if word_count <= 50 {
        strengths.push("Good answer length".to_string());
        score += 20.0;
    } else if word_count > 100 {
        improvements.push("Try to be more concise".to_string());
        score -= 5.0;
    } else {
        strengths.push("Well-detailed response".to_string());
        score += 15.0;
    }

    // 2. Keyword overlap with the reference answer
    if let Some(expected) = question.expected_answer.as_deref().filter(|e| !e.trim().is_empty()) {
        let expected_keywords = extract_keywords(expected);
        let answer_keywords = extract_keywords(&answer_lower);

        let match_ratio = if expected_keywords.is_empty() {
            0.0
        } else {
            let matches = expected_keywords.intersection(&answer_keywords).count();
            matches as f64 / expected_keywords.len() as f64
        };

        score += match_ratio * 50.0;

        if match_ratio > 0.7 {
            strengths.push("Covers key concepts effectively".to_string());
        } else if match_ratio > 0.4 {
            strengths.push("Addresses some important points".to_string());
            improvements.push("Include more key concepts from the topic".to_string());
        } else {
            improvements.push("Missing several important concepts".to_string());
            confidence = 0.6;
        }
    }

    // 3. Relevance: the answer should echo at least one question keyword
    let question_keywords = extract_keywords(&question.text);
    if question_keywords.iter().any(|kw| answer_lower.contains(kw.as_str())) {
        strengths.push("Answer is relevant to the question".to_string());
        score += 15.0;
    } else {
        improvements.push("Make sure to address the specific question asked".to_string());
        score -= 10.0;
    }

    // 4. Structural cues
    if EXAMPLE_MARKERS.iter().any(|m| answer_lower.contains(m)) {
        strengths.push("Good use of examples".to_string());
        score += 10.0;
    }
    if REASONING_MARKERS.iter().any(|m| answer_lower.contains(m)) {
        strengths.push("Provides clear reasoning".to_string());
        score += 10.0;
    }

    // 5. Technical depth for technical categories
    if is_technical_category(&question.category) {
        let terms = detect_technical_terms(trimmed);
        if terms.len() >= 3 {
            strengths.push("Demonstrates technical knowledge".to_string());
            score += 15.0;
        } else if !terms.is_empty() {
            score += 5.0;
        } else {
            improvements.push("Include more technical details".to_string());
        }
    }

    let final_score = score.clamp(0.0, 100.0);
    let is_acceptable = final_score >= ACCEPTABLE_SCORE;
    let feedback = generate_feedback(final_score, &strengths, &improvements);

    let suggested_resources = if final_score < ACCEPTABLE_SCORE {
        suggest_resources(&question.category)
    } else {
        vec![]
    };

    strengths.truncate(3);
    improvements.truncate(3);

    Evaluation {
        question_id: question.id.clone(),
        score: final_score,
        is_acceptable,
        confidence,
        feedback,
        strengths,
        improvements,
        suggested_resources,
    }
}

/// Banded opening phrase plus the first two strengths and improvements
fn generate_feedback(score: f64, strengths: &[String], improvements: &[String]) -> String {
    let opening = if score >= 85.0 {
        "Excellent answer! "
    } else if score >= 70.0 {
        "Good response! "
    } else if score >= 60.0 {
        "Decent answer. "
    } else if score >= 40.0 {
        "Your answer shows some understanding, but needs improvement. "
    } else {
        "Your answer needs significant improvement. "
    };

    let mut feedback = opening.to_string();

    if !strengths.is_empty() {
        feedback.push_str("Strengths: ");
        feedback.push_str(&strengths[..strengths.len().min(2)].join(", "));
        feedback.push_str(". ");
    }
    if !improvements.is_empty() {
        feedback.push_str("Areas to work on: ");
        feedback.push_str(&improvements[..improvements.len().min(2)].join(", "));
        feedback.push('.');
    }

    feedback
}

/// Fixed category-to-resources table, substring match on category
fn suggest_resources(category: &str) -> Vec<String> {
    let category = category.to_lowercase();
    let table: &[(&str, &[&str])] = &[
        (
            "programming",
            &[
                "Practice on LeetCode",
                "Read \"Clean Code\" by Robert Martin",
            ],
        ),
        (
            "system design",
            &[
                "Read \"Designing Data-Intensive Applications\"",
                "Practice on System Design Primer",
            ],
        ),
        (
            "algorithm",
            &[
                "Study on GeeksforGeeks",
                "Watch MIT OpenCourseWare lectures",
            ],
        ),
        (
            "database",
            &[
                "Practice SQL on HackerRank",
                "Read PostgreSQL documentation",
            ],
        ),
    ];

    let mut resources = Vec::new();
    for (key, suggestions) in table {
        if category.contains(key) {
            resources.extend(suggestions.iter().map(|s| s.to_string()));
        }
    }
    resources.truncate(3);
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Difficulty;

    fn technical_question() -> QuestionRecord {
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
            tags: None,
            hints: None,
        }
    }

    fn behavioral_question() -> QuestionRecord {
        QuestionRecord {
            id: "b1".to_string(),
            text: "Tell me about a conflict you resolved within your team.".to_string(),
            category: "Behavioral".to_string(),
            difficulty: Difficulty::Easy,
            expected_answer: None,
            tags: None,
            hints: None,
        }
    }

    // ==================== Empty Answer Tests ====================

    #[test]
    fn empty_answer_scores_exactly_zero() {
        let evaluation = evaluate(&technical_question(), "");

        assert_eq!(evaluation.score, 0.0);
        assert!(!evaluation.is_acceptable);
        assert_eq!(evaluation.confidence, 1.0);
        assert_eq!(evaluation.feedback, "No answer provided.");
        assert!(evaluation.strengths.is_empty());
    }

    #[test]
    fn whitespace_only_answer_is_treated_as_empty() {
        let evaluation = evaluate(&technical_question(), "   \n\t  ");
        assert_eq!(evaluation.score, 0.0);
        assert_eq!(evaluation.confidence, 1.0);
    }

    // ==================== Determinism Tests ====================

    #[test]
    fn evaluation_is_deterministic() {
        let question = technical_question();
        let answer = "OOP groups data and behavior into objects. Encapsulation hides state, \
                      inheritance shares behavior, polymorphism allows substitution, for \
                      example a shape hierarchy, because each subtype honors one interface.";

        let first = evaluate(&question, answer);
        let second = evaluate(&question, answer);

        assert_eq!(first, second);
    }

    // ==================== Score Bound Tests ====================

    #[test]
    fn score_is_clamped_to_valid_range() {
        let question = technical_question();
        let strong = "OOP is a programming paradigm based on objects with encapsulation, \
                      inheritance, polymorphism and abstraction. For example, a class hides \
                      its data behind an interface, because abstraction separates design from \
                      implementation in the architecture.";
        let weak = "no idea whatsoever honestly";

        let high = evaluate(&question, strong);
        let low = evaluate(&question, weak);

        assert!(high.score <= 100.0);
        assert!(low.score >= 0.0);
        assert!((0.0..=1.0).contains(&high.confidence));
        assert!((0.0..=1.0).contains(&low.confidence));
    }

    #[test]
    fn short_off_topic_answer_scores_at_most_thirty() {
        // 5 words, no overlap with the reference: -10 length, -10 relevance,
        // ~0 keyword contribution.
        let evaluation = evaluate(&technical_question(), "bananas are yellow and tasty");
        assert!(
            evaluation.score <= 30.0,
            "expected <= 30, got {}",
            evaluation.score
        );
        assert!(!evaluation.is_acceptable);
    }

    // ==================== Heuristic Branch Tests ====================

    #[test]
    fn good_length_earns_length_strength() {
        let evaluation = evaluate(
            &behavioral_question(),
            "I talked to both sides of the conflict separately and then brought the team \
             together to agree on a shared plan.",
        );
        assert!(evaluation.strengths.iter().any(|s| s == "Good answer length"));
    }

    #[test]
    fn terse_answer_earns_detail_improvement() {
        let evaluation = evaluate(&behavioral_question(), "we talked it out");
        assert!(
            evaluation
                .improvements
                .iter()
                .any(|i| i == "Provide more detailed explanation")
        );
    }

    #[test]
    fn rambling_answer_earns_concision_improvement() {
        let answer = "word ".repeat(120);
        let evaluation = evaluate(&behavioral_question(), &answer);
        assert!(
            evaluation
                .improvements
                .iter()
                .any(|i| i == "Try to be more concise")
        );
    }

    #[test]
    fn strong_keyword_overlap_earns_concept_strength() {
        let answer = "OOP is a programming paradigm based on objects, and the main principles \
                      are encapsulation, inheritance, polymorphism and abstraction.";
        let evaluation = evaluate(&technical_question(), answer);
        assert!(
            evaluation
                .strengths
                .iter()
                .any(|s| s == "Covers key concepts effectively")
        );
    }

    #[test]
    fn weak_keyword_overlap_reduces_confidence() {
        let answer = "I would guess the garden needs watering twice weekly during summer months";
        let evaluation = evaluate(&technical_question(), answer);
        assert_eq!(evaluation.confidence, 0.6);
        assert!(
            evaluation
                .improvements
                .iter()
                .any(|i| i == "Missing several important concepts")
        );
    }

    #[test]
    fn question_without_reference_skips_overlap_step() {
        let answer = "I resolved it by listening carefully to the concerns of everyone involved";
        let evaluation = evaluate(&behavioral_question(), answer);
        // No overlap branch ran, so confidence keeps its default
        assert_eq!(evaluation.confidence, 0.8);
    }

    #[test]
    fn relevant_answer_earns_relevance_bonus() {
        let evaluation = evaluate(
            &behavioral_question(),
            "The conflict started over code review tone and I helped both people reset",
        );
        assert!(
            evaluation
                .strengths
                .iter()
                .any(|s| s == "Answer is relevant to the question")
        );
    }

    #[test]
    fn example_and_reasoning_markers_add_strengths() {
        let answer = "For example I paired with the newer engineer, because shared context \
                      removes most disagreements before they grow.";
        let evaluation = evaluate(&behavioral_question(), answer);
        assert!(evaluation.strengths.iter().any(|s| s == "Good use of examples"));
        assert!(
            evaluation
                .strengths
                .iter()
                .any(|s| s == "Provides clear reasoning")
        );
    }

    #[test]
    fn technical_category_without_terms_notes_missing_depth() {
        let evaluation = evaluate(
            &technical_question(),
            "it lets you group your things together so your stuff stays neat and tidy overall",
        );
        assert!(
            evaluation
                .improvements
                .iter()
                .any(|i| i == "Include more technical details")
        );
    }

    // ==================== Output Shape Tests ====================

    #[test]
    fn lists_are_capped_at_three() {
        let question = technical_question();
        let evaluation = evaluate(&question, "short wrong thing");

        assert!(evaluation.strengths.len() <= 3);
        assert!(evaluation.improvements.len() <= 3);
        assert!(evaluation.suggested_resources.len() <= 3);
    }

    #[test]
    fn resources_only_suggested_below_acceptable_score() {
        let question = technical_question();

        let failing = evaluate(&question, "short wrong thing");
        assert!(!failing.suggested_resources.is_empty());

        let passing = evaluate(
            &question,
            "OOP is a programming paradigm based on objects. The main principles are \
             encapsulation, inheritance, polymorphism and abstraction, for example a class \
             exposes an interface because the design hides implementation.",
        );
        assert!(passing.is_acceptable);
        assert!(passing.suggested_resources.is_empty());
    }

    #[test]
    fn feedback_opens_with_score_band_phrase() {
        let failing = evaluate(&technical_question(), "short wrong thing");
        assert!(failing.feedback.starts_with("Your answer needs significant improvement."));
    }

    #[test]
    fn resource_table_matches_category_substring() {
        assert!(
            suggest_resources("System Design Interview")
                .iter()
                .any(|r| r.contains("Data-Intensive"))
        );
        assert!(suggest_resources("Knitting").is_empty());
    }
}
