use crate::types::{EvidenceRecord, Retrieved};
use ndarray::ArrayD;

/// An embedding producer for one modality.
///
/// Producers are trusted to emit numeric arrays of arbitrary rank; the
/// normalization boundary in `ragdb-vector` coerces them to `dim()` before
/// storage or query. Rank 1 (vector), 2 (tokens x hidden) and
/// 3 (batch x tokens x hidden) are accepted downstream.
pub trait EmbeddingProducer: Send + Sync {
    /// Logical dimensionality D the producer targets.
    fn dim(&self) -> usize;
    /// Compute raw embeddings for a batch of input texts, one per text.
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<ArrayD<f32>>>;
    /// Single-text convenience used on the query path.
    fn embed_text(&self, text: &str) -> anyhow::Result<ArrayD<f32>> {
        let mut out = self.embed_batch(&[text.to_string()])?;
        out.pop()
            .ok_or_else(|| anyhow::anyhow!("producer returned no embedding for query"))
    }
}

/// The mutation/query surface of an evidence store.
///
/// Implementations are not required to be internally synchronized; callers
/// must serialize mutations or wrap the store in a read-write lock.
pub trait EvidenceStore: Send + Sync {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Append a batch. All-or-nothing: on any error the stored count is
    /// unchanged. Empty input is a no-op.
    fn add(&mut self, embeddings: Vec<ArrayD<f32>>, records: Vec<EvidenceRecord>) -> crate::error::Result<()>;
    /// Exact k-nearest-neighbor search; empty store yields an empty list.
    fn search(&self, query: &ArrayD<f32>, k: usize) -> crate::error::Result<Vec<Retrieved>>;
}
