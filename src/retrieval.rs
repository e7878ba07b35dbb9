use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::Passage;

/// A stored index entry: one passage with its pre-computed embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    source_id: String,
    text: String,
    embedding: Vec<f32>,
}

/// Pre-built passage index with cosine similarity search.
///
/// Loaded once at startup and read-only for the process lifetime, so no
/// locking is needed. Building the index is an offline concern; this type
/// only consumes the JSON file it produces.
pub struct PassageIndex {
    entries: Vec<IndexEntry>,
}

impl PassageIndex {
    /// Load the index file. A missing or unparseable file aborts startup.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read passage index at {}", path.display()))?;
        let entries: Vec<IndexEntry> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse passage index at {}", path.display()))?;
        Ok(Self { entries })
    }

    /// Build an index directly from (source_id, text, embedding) triples.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String, Vec<f32>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(source_id, text, embedding)| IndexEntry {
                    source_id,
                    text,
                    embedding,
                })
                .collect(),
        }
    }

    /// Top-k passages by cosine similarity, most similar first.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<Passage> {
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query_embedding, &e.embedding), e))
            .collect();

        // Sort descending by score
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(_, e)| Passage {
                source_id: e.source_id.clone(),
                text: e.text.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Dimension of the stored embeddings, if the index has any.
    pub fn embedding_dim(&self) -> Option<usize> {
        self.entries.first().map(|e| e.embedding.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> PassageIndex {
        PassageIndex::from_entries(vec![
            (
                "guide.pdf#1".to_string(),
                "Rest and hydration help most headaches.".to_string(),
                vec![0.9, 0.1, 0.1],
            ),
            (
                "guide.pdf#2".to_string(),
                "A fever above 39C warrants medical attention.".to_string(),
                vec![0.1, 0.9, 0.1],
            ),
            (
                "guide.pdf#3".to_string(),
                "Ibuprofen reduces inflammation.".to_string(),
                vec![0.1, 0.1, 0.9],
            ),
        ])
    }

    #[test]
    fn test_search_returns_rank_order() {
        let index = sample_index();
        let results = index.search(&[0.95, 0.05, 0.05], 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].source_id, "guide.pdf#1");
    }

    #[test]
    fn test_search_truncates_to_k() {
        let index = sample_index();
        let results = index.search(&[0.5, 0.5, 0.5], 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_empty_index() {
        let index = PassageIndex::from_entries(vec![]);
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn test_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passages.json");
        let json = serde_json::json!([
            {"source_id": "a", "text": "alpha", "embedding": [1.0, 0.0]},
            {"source_id": "b", "text": "beta", "embedding": [0.0, 1.0]},
        ]);
        std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        let index = PassageIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.embedding_dim(), Some(2));
        let results = index.search(&[1.0, 0.0], 1);
        assert_eq!(results[0].source_id, "a");
        assert_eq!(results[0].text, "alpha");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PassageIndex::load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let sim = cosine_similarity(&[0.3, 0.4], &[0.3, 0.4]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
