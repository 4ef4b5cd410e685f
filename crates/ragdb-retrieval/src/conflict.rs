//! Lexical conflict detection across retrieved evidence.
//!
//! This is a coarse substring heuristic, not semantic entailment: it
//! over-flags (a negation in one chunk against an unrelated "is" in another)
//! and under-flags (contradictions that avoid these literal tokens). The
//! exact rule, including its pair ordering, is a compatibility surface; a
//! stronger detector belongs in a new, separately-tested strategy rather
//! than a silent change here.

use ragdb_core::types::EvidenceRecord;

/// Flag pairs of evidence whose lowercased contents look contradictory.
///
/// For each pair `(i, j)` with `i < j`: conflict iff `content[i]` contains
/// "not" and `content[j]` contains "is", or `content[i]` contains "false"
/// and `content[j]` contains "true". Fewer than 2 records never conflict.
pub fn detect_conflicts(evidence: &[EvidenceRecord]) -> (bool, Vec<(EvidenceRecord, EvidenceRecord)>) {
    if evidence.len() < 2 {
        return (false, vec![]);
    }

    let texts: Vec<String> = evidence.iter().map(|e| e.content.to_lowercase()).collect();

    let mut conflicts = Vec::new();
    for i in 0..texts.len() {
        for j in (i + 1)..texts.len() {
            if (texts[i].contains("not") && texts[j].contains("is"))
                || (texts[i].contains("false") && texts[j].contains("true"))
            {
                conflicts.push((evidence[i].clone(), evidence[j].clone()));
            }
        }
    }

    (!conflicts.is_empty(), conflicts)
}
