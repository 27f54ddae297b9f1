//! Interview summary generation
//!
//! Pure reduction over a completed session: per-category score breakdown,
//! strengths and improvement areas, and banded recommendations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SummaryError;
use crate::question::Difficulty;
use crate::session::Session;

/// Average minutes per answered question above which time management is
/// flagged
const SLOW_ANSWER_MINUTES: f64 = 5.0;

/// Variance below which performance counts as consistent
const CONSISTENT_VARIANCE: f64 = 100.0;

/// Derived, read-only snapshot of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub session_id: String,
    pub total_questions: usize,
    pub questions_answered: usize,
    pub overall_score: f64,
    pub difficulty: Difficulty,
    pub duration_minutes: f64,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    /// Mean score per category, keyed by the categories of answered questions
    pub category_scores: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// Reduce a completed session into its summary
///
/// The session must already carry a completion timestamp. A negative duration
/// indicates a clock or ordering bug upstream and fails loudly.
pub fn summarize(session: &Session) -> Result<InterviewSummary, SummaryError> {
    let completed_at = session.completed_at().unwrap_or_else(Utc::now);
    let started_at = session.started_at();

    if completed_at < started_at {
        return Err(SummaryError::InvalidDuration {
            started_at,
            completed_at,
        });
    }
    let duration_minutes = (completed_at - started_at).num_milliseconds() as f64 / 60_000.0;

    let category_scores = category_scores(session);
    let (strengths, improvements) = analyze_performance(session, &category_scores);
    let recommendations = recommendations(session, &category_scores, duration_minutes);

    Ok(InterviewSummary {
        session_id: session.id().to_string(),
        total_questions: session.questions().len(),
        questions_answered: session.responses().len(),
        overall_score: session.score(),
        difficulty: session.difficulty(),
        duration_minutes,
        strengths,
        areas_for_improvement: improvements,
        category_scores,
        recommendations,
        completed_at,
    })
}

/// Mean response score per category, over answered questions only
fn category_scores(session: &Session) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for response in session.responses() {
        let Some(question) = session
            .questions()
            .iter()
            .find(|q| q.id == response.question_id)
        else {
            continue;
        };
        let entry = totals.entry(question.category.clone()).or_insert((0.0, 0));
        entry.0 += response.score;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(category, (total, count))| (category, total / count as f64))
        .collect()
}

/// Category, consistency, and overall-band strengths and improvement areas
///
/// Both lists are capped at 5, first-computed order preserved.
fn analyze_performance(
    session: &Session,
    category_scores: &BTreeMap<String, f64>,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    for (category, score) in category_scores {
        if *score >= 80.0 {
            strengths.push(format!("Strong performance in {}", category));
        } else if *score < 60.0 {
            improvements.push(format!("Need more practice in {}", category));
        }
    }

    let responses = session.responses();
    if !responses.is_empty() {
        let mean = session.score();
        let variance = responses
            .iter()
            .map(|r| (r.score - mean).powi(2))
            .sum::<f64>()
            / responses.len() as f64;

        if variance < CONSISTENT_VARIANCE {
            strengths.push("Consistent performance across questions".to_string());
        } else {
            improvements.push("Work on consistency".to_string());
        }
    }

    let overall = session.score();
    if overall >= 85.0 {
        strengths.push("Excellent overall performance".to_string());
    } else if overall >= 70.0 {
        strengths.push("Good overall understanding".to_string());
    } else if overall < 60.0 {
        improvements.push("Focus on fundamentals".to_string());
    }

    strengths.truncate(5);
    improvements.truncate(5);
    (strengths, improvements)
}

/// Banded recommendations, capped at 5 in generation order
fn recommendations(
    session: &Session,
    category_scores: &BTreeMap<String, f64>,
    duration_minutes: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let overall = session.score();
    if overall < 60.0 {
        recommendations
            .push("Review fundamental concepts before attempting more questions".to_string());
        recommendations.push("Start with easier difficulty level to build confidence".to_string());
    } else if overall < 80.0 {
        recommendations.push("Practice more questions in weak categories".to_string());
        recommendations.push("Try explaining answers out loud to improve clarity".to_string());
    } else {
        recommendations.push("Challenge yourself with harder questions".to_string());
        recommendations.push("Focus on optimizing your solutions".to_string());
    }

    let weak: Vec<&str> = category_scores
        .iter()
        .filter(|(_, score)| **score < 65.0)
        .map(|(category, _)| category.as_str())
        .collect();
    if !weak.is_empty() {
        recommendations.push(format!("Focus on: {}", weak.join(", ")));
    }

    let answered = session.responses().len();
    if answered > 0 && duration_minutes / answered as f64 > SLOW_ANSWER_MINUTES {
        recommendations
            .push("Practice time management - aim for 3-4 minutes per question".to_string());
    }

    recommendations.truncate(5);
    recommendations
}
