//! Intent-aware confidence scoring.
//!
//! Confidence is a step function of result count, not of distances: the
//! score encodes corroboration across independent chunks. The lack of
//! distance weighting is intentional and relied on by compatibility tests.

use ragdb_core::types::{Intent, Retrieved};

/// Map a retrieval result set and intent to a confidence in [0, 1].
///
/// Empty results are always 0.0. Summarization is a fixed 0.85 regardless of
/// count: if any document content exists, a summary is credibly producible.
/// Every other intent takes the count-based step.
pub fn confidence_score(results: &[Retrieved], intent: Intent) -> f32 {
    if results.is_empty() {
        return 0.0;
    }

    if intent == Intent::Summarization {
        return 0.85;
    }

    match results.len() {
        n if n >= 5 => 0.9,
        3 | 4 => 0.75,
        2 => 0.55,
        _ => 0.35,
    }
}

pub const LIMITED_EVIDENCE: &str = "This answer is based on limited evidence.";
pub const HIGH_UNCERTAINTY: &str = "High uncertainty: evidence is weak or incomplete.";

/// Classify a confidence scalar into an advisory band.
///
/// `>= 0.8` needs no advisory; `[0.5, 0.8)` gets the limited-evidence note;
/// below 0.5 the high-uncertainty note. The band edges line up with the
/// values `confidence_score` can emit.
pub fn uncertainty_message(confidence: f32) -> Option<&'static str> {
    if confidence >= 0.8 {
        None
    } else if confidence >= 0.5 {
        Some(LIMITED_EVIDENCE)
    } else {
        Some(HIGH_UNCERTAINTY)
    }
}
