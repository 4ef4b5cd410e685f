use ragdb_core::types::Intent;

const COMPARISON_WORDS: [&str; 4] = ["compare", "difference", "vs", "contrast"];
const SUMMARIZATION_WORDS: [&str; 3] = ["summarize", "summary", "overview"];

/// Keyword-driven intent classification. Total and deterministic over all
/// string inputs; the empty string defaults to `Qa`.
pub fn classify_intent(query: &str) -> Intent {
    let q = query.to_lowercase();

    if COMPARISON_WORDS.iter().any(|w| q.contains(w)) {
        return Intent::Comparison;
    }
    if SUMMARIZATION_WORDS.iter().any(|w| q.contains(w)) {
        return Intent::Summarization;
    }
    Intent::Qa
}
