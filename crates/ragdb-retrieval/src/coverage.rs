use ragdb_core::types::EvidenceRecord;
use std::collections::HashMap;

/// Percentage contribution of each originating source document, rounded to
/// two decimal places. Percentages sum to 100 subject to rounding.
///
/// Empty input returns an empty map; there is deliberately no division by a
/// zero total.
pub fn document_coverage(evidence: &[EvidenceRecord]) -> HashMap<String, f32> {
    let total = evidence.len();
    if total == 0 {
        return HashMap::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in evidence {
        *counts.entry(record.source.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(source, count)| {
            let pct = (count as f32 / total as f32) * 100.0;
            (source.to_string(), (pct * 100.0).round() / 100.0)
        })
        .collect()
}
