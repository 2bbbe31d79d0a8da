use super::action::ActionItem;
use crate::error::Result;
use std::sync::Arc;

pub const MAX_RESULTS: usize = 6;

const EXACT_LABEL: u32 = 100;
const LABEL_PREFIX: u32 = 80;
const LABEL_CONTAINS: u32 = 60;
const ID_CONTAINS: u32 = 40;
const ALL_WORDS_BASE: u32 = 50;
const WORD_PREFIX_BONUS: u32 = 10;

/// Lower-cased, whitespace-separated query words. Empty tokens are dropped.
fn query_words(query: &str) -> Vec<String> {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Relevance of one action for the tokenized query. Zero means no match.
pub fn score(words: &[String], item: &ActionItem) -> Result<u32> {
    let label = item.label_text()?.to_lowercase();
    let id = item.id.to_lowercase();

    if let [word] = words {
        let score = if label == *word {
            EXACT_LABEL
        } else if label.starts_with(word.as_str()) {
            LABEL_PREFIX
        } else if label.contains(word.as_str()) {
            LABEL_CONTAINS
        } else if id.contains(word.as_str()) {
            ID_CONTAINS
        } else {
            0
        };
        return Ok(score);
    }

    let searchable = format!("{label} {id}");
    if !words.iter().all(|w| searchable.contains(w.as_str())) {
        return Ok(0);
    }
    let prefix_hits = words
        .iter()
        .filter(|w| label.starts_with(w.as_str()))
        .count() as u32;
    Ok(ALL_WORDS_BASE + prefix_hits * WORD_PREFIX_BONUS)
}

/// Orders `candidates` by relevance to `query`, keeping at most
/// [`MAX_RESULTS`]. Non-matching candidates are dropped and ties keep their
/// input order. An empty query returns the leading candidates unscored.
pub fn rank(query: &str, candidates: &[Arc<ActionItem>]) -> Vec<Arc<ActionItem>> {
    if query.is_empty() {
        return candidates.iter().take(MAX_RESULTS).cloned().collect();
    }

    let words = query_words(query);
    let mut scored: Vec<(u32, &Arc<ActionItem>)> = candidates
        .iter()
        .filter_map(|item| match score(&words, item) {
            Ok(0) => None,
            Ok(s) => Some((s, item)),
            Err(err) => {
                tracing::warn!(action = %item.id, error = %err, "skipping action while ranking");
                None
            }
        })
        .collect();

    // sort_by is stable, so equal scores keep registration order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, item)| Arc::clone(item))
        .collect()
}
