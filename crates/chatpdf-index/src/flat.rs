use chatpdf_config::DistanceMetric;
use chatpdf_core::{ChatPdfError, Result, ScoredChunk};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct IndexEntry {
    text: String,
    vector: Vec<f32>,
}

/// Flat index: every search scans all stored vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Build from `(chunk text, embedding)` pairs; all vectors must share one dimension
    pub fn build(items: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let dimension = match items.first() {
            Some((_, vector)) => vector.len(),
            None => {
                return Err(ChatPdfError::Unexpected(
                    "cannot build an index from zero chunks".to_string(),
                ))
            }
        };
        if dimension == 0 {
            return Err(ChatPdfError::Unexpected(
                "cannot build an index from zero-length vectors".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(items.len());
        for (position, (text, vector)) in items.into_iter().enumerate() {
            if vector.len() != dimension {
                return Err(ChatPdfError::Unexpected(format!(
                    "vector dimension mismatch at chunk {}: expected {}, got {}",
                    position,
                    dimension,
                    vector.len()
                )));
            }
            entries.push(IndexEntry { text, vector });
        }

        Ok(Self { dimension, entries })
    }

    /// Up to `k` chunks nearest to `query`, best first
    ///
    /// `L2` scores are squared euclidean distances (lower is better),
    /// `Cosine` scores are similarities (higher is better). Ties keep
    /// insertion order.
    pub fn search(&self, query: &[f32], k: usize, metric: DistanceMetric) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimension {
            return Err(ChatPdfError::Unexpected(format!(
                "query dimension mismatch: index has {}, query has {}",
                self.dimension,
                query.len()
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let score = match metric {
                    DistanceMetric::L2 => squared_l2(query, &entry.vector),
                    DistanceMetric::Cosine => cosine_similarity(query, &entry.vector),
                };
                (i, score)
            })
            .collect();

        match metric {
            DistanceMetric::L2 => {
                scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            }
            DistanceMetric::Cosine => {
                scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            }
        }

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredChunk {
                text: self.entries[i].text.clone(),
                score,
            })
            .collect())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
