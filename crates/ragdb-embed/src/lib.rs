//! Deterministic, offline embedding producers.
//!
//! Real model-backed producers (sentence transformers, image/audio encoders)
//! are external collaborators; these hashing producers keep the CLI and the
//! test suite fully offline and reproducible. `TokenHashingEmbedder`
//! deliberately emits rank-2 output so the normalization boundary's pooling
//! path is exercised end to end.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use anyhow::Result;
use ndarray::{Array1, Array2, ArrayD};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use ragdb_core::traits::EmbeddingProducer;

fn hash_token_into(token: &str, position: usize, v: &mut [f32]) {
    let mut hasher = XxHash64::with_seed(0);
    token.hash(&mut hasher);
    let h = hasher.finish();
    let idx = (h as usize) % v.len();
    let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
    v[idx] += val + (position as f32 % 3.0) * 0.01;
}

fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
    for x in v.iter_mut() {
        *x /= norm;
    }
}

/// Sentence-level producer: one rank-1 vector per text.
///
/// Blank input yields the all-zero vector of length `dim`, the degenerate
/// representation the normalizer accepts for empty text.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        if text.trim().is_empty() {
            return v;
        }
        for (i, token) in text.split_whitespace().enumerate() {
            hash_token_into(token, i, &mut v);
        }
        l2_normalize(&mut v);
        v
    }
}

impl EmbeddingProducer for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<ArrayD<f32>>> {
        Ok(texts.iter().map(|t| Array1::from_vec(self.embed_one(t)).into_dyn()).collect())
    }
}

/// Token-level producer: one hashed vector per whitespace token, emitted as a
/// rank-2 `tokens x dim` array that the normalizer mean-pools.
pub struct TokenHashingEmbedder {
    dim: usize,
}

impl TokenHashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Array2<f32> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            // One zero token row keeps the token axis non-empty.
            return Array2::zeros((1, self.dim));
        }
        let mut out = Array2::zeros((tokens.len(), self.dim));
        for (i, token) in tokens.iter().enumerate() {
            let mut row = vec![0f32; self.dim];
            hash_token_into(token, i, &mut row);
            l2_normalize(&mut row);
            for (j, x) in row.into_iter().enumerate() {
                out[[i, j]] = x;
            }
        }
        out
    }
}

impl EmbeddingProducer for TokenHashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<ArrayD<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t).into_dyn()).collect())
    }
}

/// Default producer used by the CLI and tests.
pub fn get_default_producer(dim: usize) -> Box<dyn EmbeddingProducer> {
    Box::new(HashingEmbedder::new(dim))
}
