//! Vector similarity primitives.

/// Cosine similarity between two embedding vectors.
///
/// Returns `0.0` for mismatched lengths or zero-magnitude vectors, so a
/// degenerate embedding ranks last instead of poisoning the ordering.
///
/// # Example
///
/// ```
/// use neuroroute_domain::cosine_similarity;
///
/// let a = vec![1.0, 0.0];
/// let b = vec![1.0, 0.0];
/// assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}
