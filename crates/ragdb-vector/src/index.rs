//! Append-only exact nearest-neighbor store.
//!
//! Corpora are small (single-user, per-session ingestion), so a brute-force
//! squared-L2 scan gives bit-exact ranking at interactive latency; no
//! approximate structure is involved. Not internally synchronized: callers
//! must serialize mutations, or wrap the index in a read-write lock if
//! concurrent access is ever introduced.

use ndarray::ArrayD;
use tracing::debug;

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::EvidenceStore;
use ragdb_core::types::{EvidenceRecord, Retrieved};

use crate::normalize::normalize;

/// Vector and record stored together as one logical entity, so a
/// nearest-neighbor match resolves to its record by construction. There are
/// no parallel containers to drift out of sync.
#[derive(Debug, Clone)]
struct Entry {
    vector: Vec<f32>,
    record: EvidenceRecord,
}

pub struct VectorIndex {
    dim: usize,
    entries: Vec<Entry>,
}

impl VectorIndex {
    pub fn new(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a batch of raw embeddings with their records.
    ///
    /// Either side empty is a no-op. Differing lengths are rejected with
    /// [`Error::LengthMismatch`] before anything is written. Every embedding
    /// is normalized first; only when the whole batch is valid are entries
    /// appended, so a failed call never leaves a partial batch behind. A
    /// rejected embedding is reported as [`Error::BadEmbedding`] with its
    /// position in the batch, letting the ingesting caller skip or surface
    /// the offending item.
    pub fn add(&mut self, embeddings: Vec<ArrayD<f32>>, records: Vec<EvidenceRecord>) -> Result<()> {
        if embeddings.is_empty() || records.is_empty() {
            return Ok(());
        }
        if embeddings.len() != records.len() {
            return Err(Error::LengthMismatch { vectors: embeddings.len(), records: records.len() });
        }

        let mut prepared = Vec::with_capacity(embeddings.len());
        for (i, raw) in embeddings.iter().enumerate() {
            let vector = normalize(raw, self.dim)
                .map_err(|e| Error::BadEmbedding { index: i, source: Box::new(e) })?;
            prepared.push(vector);
        }

        debug!(batch = prepared.len(), total = self.entries.len() + prepared.len(), "index add");
        self.entries
            .extend(prepared.into_iter().zip(records).map(|(vector, record)| Entry { vector, record }));
        Ok(())
    }

    /// Exact k-nearest-neighbor search by squared Euclidean distance.
    ///
    /// An empty index yields an empty list, not an error; "no corpus" and
    /// "no matches" are indistinguishable here by design.
    pub fn search(&self, query: &ArrayD<f32>, k: usize) -> Result<Vec<Retrieved>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(vec![]);
        }
        let q = normalize(query, self.dim)?;

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, squared_l2(&q, &entry.vector)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(k, hits = scored.len(), "index search");
        Ok(scored
            .into_iter()
            .map(|(i, distance)| Retrieved { record: self.entries[i].record.clone(), distance })
            .collect())
    }
}

impl EvidenceStore for VectorIndex {
    fn len(&self) -> usize {
        Self::len(self)
    }
    fn add(&mut self, embeddings: Vec<ArrayD<f32>>, records: Vec<EvidenceRecord>) -> Result<()> {
        Self::add(self, embeddings, records)
    }
    fn search(&self, query: &ArrayD<f32>, k: usize) -> Result<Vec<Retrieved>> {
        Self::search(self, query, k)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
