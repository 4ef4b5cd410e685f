//! Facade tying the index and the scoring layer together.

use anyhow::Result;
use ndarray::ArrayD;
use tracing::{debug, info};

use ragdb_core::traits::EmbeddingProducer;
use ragdb_core::types::EvidenceRecord;
use ragdb_vector::VectorIndex;

use crate::confidence::{confidence_score, uncertainty_message};
use crate::conflict::detect_conflicts;
use crate::coverage::document_coverage;
use crate::intent::classify_intent;
use crate::session::RetrievalSession;

/// One ingestion batch: raw embeddings and their records for a single
/// uploaded artifact.
pub type IngestBatch = (Vec<ArrayD<f32>>, Vec<EvidenceRecord>);

pub struct Retriever {
    producer: Box<dyn EmbeddingProducer>,
    index: VectorIndex,
    k: usize,
}

impl Retriever {
    pub fn new(producer: Box<dyn EmbeddingProducer>, k: usize) -> Self {
        let index = VectorIndex::new(producer.dim());
        Self { producer, index, k }
    }

    pub fn corpus_len(&self) -> usize {
        self.index.len()
    }

    /// Replace the whole corpus with the given per-artifact batches.
    ///
    /// A fresh index is populated first and swapped in only once every batch
    /// has been appended; a failed batch leaves the previous corpus serving
    /// unchanged. Returns the number of stored entries.
    pub fn rebuild<I>(&mut self, batches: I) -> ragdb_core::error::Result<usize>
    where
        I: IntoIterator<Item = IngestBatch>,
    {
        let mut fresh = VectorIndex::new(self.producer.dim());
        for (embeddings, records) in batches {
            fresh.add(embeddings, records)?;
        }
        let stored = fresh.len();
        self.index = fresh;
        info!(stored, "corpus rebuilt");
        Ok(stored)
    }

    /// Convenience ingestion path for text records: embed each record's
    /// content with the producer, then rebuild the corpus from the result.
    pub fn ingest_records(&mut self, records: Vec<EvidenceRecord>) -> Result<usize> {
        let texts: Vec<String> = records.iter().map(|r| r.content.clone()).collect();
        let embeddings = self.producer.embed_batch(&texts)?;
        Ok(self.rebuild([(embeddings, records)])?)
    }

    /// Run the full query path: classify intent, embed, search, then compute
    /// the quality signals over the result set.
    pub fn ask(&self, query: &str) -> Result<RetrievalSession> {
        let intent = classify_intent(query);
        let raw = self.producer.embed_text(query)?;
        let results = self.index.search(&raw, self.k)?;
        debug!(%intent, hits = results.len(), "query executed");

        let evidence: Vec<EvidenceRecord> = results.iter().map(|r| r.record.clone()).collect();
        let confidence = confidence_score(&results, intent);
        let uncertainty = uncertainty_message(confidence).map(str::to_string);
        let coverage = document_coverage(&evidence);
        let (has_conflict, conflicts) = detect_conflicts(&evidence);

        Ok(RetrievalSession {
            query: query.to_string(),
            intent,
            results,
            confidence,
            uncertainty,
            coverage,
            has_conflict,
            conflicts,
        })
    }
}
