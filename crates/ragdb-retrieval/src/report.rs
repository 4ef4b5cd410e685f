//! Prompt context and plain-text report rendering for downstream consumers.

use std::fmt::Write;

use ragdb_core::types::EvidenceRecord;

use crate::session::RetrievalSession;

const REPORT_CONTENT_CHARS: usize = 300;

/// Numbered evidence blocks for the external LLM prompt:
/// `[1] first chunk`, `[2] second chunk`, ...
pub fn build_context(evidence: &[&EvidenceRecord]) -> String {
    evidence
        .iter()
        .enumerate()
        .map(|(i, e)| format!("[{}] {}", i + 1, e.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Plain-text export of one retrieval session, with the optional generated
/// answer. Evidence content is truncated on a char boundary.
pub fn render_report(session: &RetrievalSession, answer: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== MULTIMODAL RAG REPORT ===\n");
    let _ = writeln!(out, "Query:\n{}\n", session.query);
    if let Some(answer) = answer {
        let _ = writeln!(out, "Answer:\n{}\n", answer);
    }
    let _ = writeln!(out, "Confidence: {}%", (session.confidence * 100.0) as u32);
    if let Some(note) = &session.uncertainty {
        let _ = writeln!(out, "Note: {}", note);
    }

    let _ = writeln!(out, "\nCoverage:");
    let mut coverage: Vec<_> = session.coverage.iter().collect();
    coverage.sort_by(|a, b| a.0.cmp(b.0));
    for (source, pct) in coverage {
        let _ = writeln!(out, "  {}: {:.2}%", source, pct);
    }

    if session.has_conflict {
        let _ = writeln!(out, "\nPotential conflicts: {}", session.conflicts.len());
    }

    let _ = writeln!(out, "\nEvidence Used:");
    for (i, e) in session.evidence().iter().enumerate() {
        let content: String = e.content.chars().take(REPORT_CONTENT_CHARS).collect();
        let _ = writeln!(out, "{}. {} | modality={}", i + 1, e.source, e.modality);
        let _ = writeln!(out, "   Content: {}", content);
    }

    out
}
