//! Similarity ranking.
//!
//! Exhaustively scores every stored document against a query vector
//! with cosine similarity. The corpus is assumed small enough that an
//! O(n) scan per query is acceptable; there is no approximate index.

use concordia_core::model::{Document, DocumentId};

use crate::error::{SearchError, SearchResult};

/// Smallest accepted result limit.
pub const MIN_LIMIT: usize = 1;

/// Largest accepted result limit.
pub const MAX_LIMIT: usize = 100;

/// A scored document, produced fresh per query and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub id: DocumentId,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
    pub document: Document,
}

/// Cosine similarity between two vectors.
///
/// Returns exactly `0.0` when either vector has zero norm. Vectors of
/// different lengths are an error, never silently truncated.
pub fn cosine(a: &[f32], b: &[f32]) -> SearchResult<f32> {
    if a.len() != b.len() {
        return Err(SearchError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Clamp a caller-supplied limit into `[MIN_LIMIT, MAX_LIMIT]`.
#[must_use]
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Rank candidates against a query vector, best first.
///
/// Candidates without an embedding are excluded before scoring, not
/// scored as zero. Ties are broken by creation time (newest first),
/// then id, so repeated queries over an unchanged corpus return the
/// same order.
///
/// # Errors
/// Returns [`SearchError::DimensionMismatch`] when a stored vector's
/// length differs from the query's.
pub fn rank(
    query: &[f32],
    candidates: Vec<Document>,
    limit: usize,
) -> SearchResult<Vec<RankedResult>> {
    let mut results = Vec::new();

    for document in candidates {
        let Some(embedding) = document.embedding.as_deref() else {
            continue;
        };
        let score = cosine(query, embedding)?;
        results.push(RankedResult {
            id: document.id,
            score,
            document,
        });
    }

    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.document.created_at.cmp(&a.document.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    results.truncate(clamp_limit(limit));

    Ok(results)
}
