use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use ragdb_core::types::{EvidenceRecord, Intent, Retrieved};

/// Everything the downstream answer/report step needs for one query:
/// the results and the quality signals computed over them. Ephemeral and
/// caller-owned; records inside are clones, so consumers cannot mutate the
/// indexed corpus through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSession {
    pub query: String,
    pub intent: Intent,
    pub results: Vec<Retrieved>,
    pub confidence: f32,
    pub uncertainty: Option<String>,
    pub coverage: HashMap<String, f32>,
    pub has_conflict: bool,
    pub conflicts: Vec<(EvidenceRecord, EvidenceRecord)>,
}

impl RetrievalSession {
    /// The evidence records in retrieval order, without distances.
    pub fn evidence(&self) -> Vec<&EvidenceRecord> {
        self.results.iter().map(|r| &r.record).collect()
    }
}
