//! Embedding similarity: semantic match between resume and job description.
//!
//! The score is best-effort: any model or encoding failure degrades to 0.0
//! and is logged, it never fails the request.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::aggregator::round_to;

/// Encodes texts into fixed-length dense vectors.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;
}

/// fastembed-backed embedder. The ONNX model is loaded on first use and kept
/// for the lifetime of the process; a failed load is retried on the next call.
pub struct FastEmbedder {
    model: OnceCell<TextEmbedding>,
    kind: EmbeddingModel,
}

impl FastEmbedder {
    pub fn new() -> Self {
        Self {
            model: OnceCell::new(),
            kind: EmbeddingModel::AllMiniLML6V2,
        }
    }

    fn model(&self) -> Result<&TextEmbedding> {
        self.model.get_or_try_init(|| {
            info!("Loading embedding model {:?}", self.kind);
            TextEmbedding::try_new(
                InitOptions::new(self.kind.clone()).with_show_download_progress(false),
            )
        })
    }
}

impl Default for FastEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        self.model()?.embed(texts, None)
    }
}

/// Cosine similarity in [0, 1], full precision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    pub const ZERO: SimilarityScore = SimilarityScore(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Display value, 3 decimals.
    pub fn rounded(self) -> f64 {
        round_to(self.0, 3)
    }

    /// ATS compatibility percentage as shown to the user, 1 decimal.
    pub fn ats_percentage(self) -> f64 {
        round_to(self.rounded() * 100.0, 1)
    }
}

/// `dot(u,v) / (|u| |v|)`, clamped into [0, 1].
/// Zero-norm vectors and dimension mismatches yield 0.0.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f64 {
    if u.len() != v.len() {
        warn!(
            u_len = u.len(),
            v_len = v.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = u.iter().zip(v).map(|(a, b)| *a as f64 * *b as f64).sum();
    let norm_u = u.iter().map(|a| (*a as f64).powi(2)).sum::<f64>().sqrt();
    let norm_v = v.iter().map(|b| (*b as f64).powi(2)).sum::<f64>().sqrt();

    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }

    (dot / (norm_u * norm_v)).clamp(0.0, 1.0)
}

/// Scores resume/job similarity through a shared [`Embedder`].
#[derive(Clone)]
pub struct SimilarityScorer {
    embedder: Arc<dyn Embedder>,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Blocking. Each text is encoded on its own.
    pub fn similarity(&self, text_a: &str, text_b: &str) -> SimilarityScore {
        match self.try_similarity(text_a, text_b) {
            Ok(score) => score,
            Err(e) => {
                warn!("Error calculating similarity: {e:#}");
                SimilarityScore::ZERO
            }
        }
    }

    /// Runs [`Self::similarity`] on the blocking pool.
    pub async fn similarity_async(&self, text_a: String, text_b: String) -> SimilarityScore {
        let scorer = self.clone();
        tokio::task::spawn_blocking(move || scorer.similarity(&text_a, &text_b))
            .await
            .unwrap_or_else(|e| {
                warn!("Similarity task failed: {e}");
                SimilarityScore::ZERO
            })
    }

    fn try_similarity(&self, text_a: &str, text_b: &str) -> Result<SimilarityScore> {
        let u = self.embed_one(text_a)?;
        let v = self.embed_one(text_b)?;
        Ok(SimilarityScore::new(cosine_similarity(&u, &v)))
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embedder
            .embed(vec![text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("embedder returned no vectors"))
    }
}
