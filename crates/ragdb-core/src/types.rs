//! Domain types shared by the index and the retrieval-quality layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Modality-specific metadata (chunk index, sheet name, row range, time span).
pub type Meta = HashMap<String, String>;

/// Which kind of producer emitted a piece of evidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
    Excel,
    Video,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Excel => "excel",
            Modality::Video => "video",
        };
        f.write_str(s)
    }
}

/// One retrievable content chunk, stored alongside its embedding.
///
/// - `content`: the literal text/representation retrieved
/// - `source`: originating file identifier
/// - `modality`: producer kind
/// - `extra`: optional modality-specific fields
///
/// Records are immutable once indexed; downstream consumers get clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceRecord {
    pub content: String,
    pub source: String,
    pub modality: Modality,
    #[serde(default)]
    pub extra: Meta,
}

impl EvidenceRecord {
    pub fn new(content: impl Into<String>, source: impl Into<String>, modality: Modality) -> Self {
        Self { content: content.into(), source: source.into(), modality, extra: Meta::new() }
    }
}

/// One search hit: the matched record and its squared-L2 distance to the
/// query. Lower is closer; results come back ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieved {
    pub record: EvidenceRecord,
    pub distance: f32,
}

/// Coarse query purpose used to bias confidence scoring.
///
/// `Comparison` is an additive extension; it shares `Qa`'s confidence path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Qa,
    Summarization,
    Comparison,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Qa => "qa",
            Intent::Summarization => "summarization",
            Intent::Comparison => "comparison",
        };
        f.write_str(s)
    }
}
