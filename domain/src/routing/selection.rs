//! Statistical topic selection.
//!
//! Topics are selected when their similarity score clears `mean + population
//! standard deviation` of all scores for the query. An absolute floor guards
//! the degenerate case where every topic scores poorly: with very few topics
//! a merely-above-average match can still be an objectively weak one.

/// Absolute similarity floor below which a topic is never selected.
pub const DEFAULT_SCORE_FLOOR: f32 = 0.2;

/// Selection threshold for a score vector: `mean + population stddev`.
///
/// Returns `0.0` for an empty score vector.
pub fn selection_threshold(scores: &[f32]) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }
    let n = scores.len() as f32;
    let mean = scores.iter().sum::<f32>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n;
    mean + variance.sqrt()
}

/// Policy deciding which topic indices a score vector selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    /// Absolute floor a score must reach regardless of the threshold.
    pub score_floor: f32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            score_floor: DEFAULT_SCORE_FLOOR,
        }
    }
}

impl SelectionPolicy {
    pub fn new(score_floor: f32) -> Self {
        Self { score_floor }
    }

    /// Indices whose score strictly exceeds the threshold and meets the
    /// floor, in original score order.
    pub fn select(&self, scores: &[f32]) -> Vec<usize> {
        let threshold = selection_threshold(scores);
        scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score > threshold && score >= self.score_floor)
            .map(|(i, _)| i)
            .collect()
    }
}
