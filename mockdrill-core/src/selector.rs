//! Relevance & diversity question selection
//!
//! Pure and deterministic given identical inputs: every ordering uses a stable
//! sort keyed only on the stated criterion, so original bank order is the
//! tie-break everywhere. The only randomness lives in [`FallbackPicker`],
//! which takes an explicit seed and never feeds scored behavior.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::question::{Difficulty, QuestionRecord, UserContext};

/// Select the initial ordered question list for a session
///
/// Pipeline: band filter, optional relevance ranking against the user
/// context, category round-robin diversification, then ascending sort by
/// difficulty weight so the interview ramps up. Returns fewer than `count`
/// items when the bank cannot supply more; never fabricates questions and
/// never duplicates ids.
pub fn select_initial(
    bank: &[QuestionRecord],
    difficulty: Difficulty,
    count: usize,
    user_context: Option<&UserContext>,
) -> Vec<QuestionRecord> {
    let band = difficulty.band();
    let mut candidates: Vec<QuestionRecord> = bank
        .iter()
        .filter(|q| band.contains(&q.difficulty))
        .cloned()
        .collect();

    if let Some(context) = user_context
        && !context.is_empty()
    {
        rank_by_relevance(&mut candidates, context);
    }

    let mut selected = diversify_categories(candidates, count);

    selected.sort_by(|a, b| a.difficulty.weight().total_cmp(&b.difficulty.weight()));
    selected.truncate(count);
    selected
}

/// Rank candidates by relevance to the user context, descending
///
/// Relevance = keyword hits in question text + 2x keyword hits in tags.
/// Stable sort keeps bank order for ties.
fn rank_by_relevance(candidates: &mut [QuestionRecord], context: &UserContext) {
    let keywords = context.keywords();

    let relevance = |question: &QuestionRecord| -> usize {
        let text = question.text.to_lowercase();
        let text_matches = keywords.iter().filter(|kw| text.contains(kw.as_str())).count();

        let tag_matches = question
            .tags
            .as_deref()
            .map(|tags| {
                tags.iter()
                    .filter(|tag| keywords.contains(&tag.to_lowercase()))
                    .count()
            })
            .unwrap_or(0);

        text_matches + tag_matches * 2
    };

    candidates.sort_by_key(|q| std::cmp::Reverse(relevance(q)));
}

/// Round-robin draw across distinct categories
///
/// Guarantees no single category dominates when alternatives exist. When the
/// candidate pool already fits within `count` there is nothing to balance.
fn diversify_categories(candidates: Vec<QuestionRecord>, count: usize) -> Vec<QuestionRecord> {
    if candidates.len() <= count {
        return candidates;
    }

    // Group by category, preserving first-seen category order
    let mut categories: Vec<String> = Vec::new();
    let mut by_category: HashMap<String, Vec<QuestionRecord>> = HashMap::new();
    for question in candidates {
        if !by_category.contains_key(&question.category) {
            categories.push(question.category.clone());
        }
        by_category
            .entry(question.category.clone())
            .or_default()
            .push(question);
    }

    let mut selected = Vec::with_capacity(count);
    let mut idx = 0;
    while selected.len() < count && !categories.is_empty() {
        let category = &categories[idx % categories.len()];
        match by_category.get_mut(category) {
            Some(pool) if !pool.is_empty() => {
                selected.push(pool.remove(0));
                idx += 1;
            }
            _ => {
                let exhausted = categories.remove(idx % categories.len());
                by_category.remove(&exhausted);
            }
        }
    }

    selected
}

/// Pick the next question adaptively from the session's remaining questions
///
/// Operates only over the remaining unanswered subset; never pulls new
/// questions mid-session. Returns `None` when the interview content is
/// exhausted. With no score history the first remaining question is returned
/// unchanged. Otherwise: mean > 80 steps up to the hardest remaining
/// question, mean < 50 steps down to the easiest, anything between keeps the
/// original order. Ties within a tier break by original order.
pub fn select_adaptive<'a>(
    remaining: &'a [QuestionRecord],
    mean_score: Option<f64>,
) -> Option<&'a QuestionRecord> {
    let first = remaining.first()?;

    let mean = match mean_score {
        Some(mean) => mean,
        None => return Some(first),
    };

    if mean > 80.0 {
        remaining.iter().reduce(|best, q| {
            if q.difficulty.weight() > best.difficulty.weight() {
                q
            } else {
                best
            }
        })
    } else if mean < 50.0 {
        remaining.iter().reduce(|best, q| {
            if q.difficulty.weight() < best.difficulty.weight() {
                q
            } else {
                best
            }
        })
    } else {
        Some(first)
    }
}

/// Seedable random selection for surfaces with no fed question list
///
/// Tests pin the seed to make the draw deterministic.
pub struct FallbackPicker {
    rng: StdRng,
}

impl FallbackPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one item uniformly, or None from an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..items.len());
        items.get(idx)
    }
}
