//! Majority-style voting over parsed candidate sets.
//!
//! One candidate set exists per sampled completion; the voter reconciles
//! them into a single [`TurnOutcome`]. The voting key is the signature:
//! ordered command names with text items and parameter values excluded.
//!
//! Any signature shared by two or more sets wins — 2-of-3 or 2-of-5 is
//! already a useful consensus signal, so no strict majority is required.
//! Within a signature class the first-seen set wins, parameters included.
//! When nothing repeats and more than one command-only interpretation
//! exists, the ambiguity is surfaced instead of resolved arbitrarily.

use super::outcome::TurnOutcome;
use crate::command::item::{CandidateSet, ParsedItem};

/// Resolve candidate sets from one turn into a single outcome.
///
/// Deterministic: voting the same list twice yields the same outcome.
pub fn vote(candidates: Vec<CandidateSet>) -> TurnOutcome {
    if candidates.is_empty() {
        return TurnOutcome::Empty;
    }
    if candidates.len() == 1 {
        return TurnOutcome::Decision(candidates.into_iter().next().unwrap_or_default());
    }

    // Text answers have no discrete signature to vote on; when nothing but
    // text came back, answer with the first text encountered.
    if candidates.iter().all(|set| set.items().iter().all(ParsedItem::is_text)) {
        let first_text = candidates
            .iter()
            .flat_map(|set| set.items())
            .find(|item| item.is_text())
            .cloned();
        return match first_text {
            Some(item) => TurnOutcome::Decision(CandidateSet::new(vec![item])),
            None => TurnOutcome::Empty,
        };
    }

    let signatures: Vec<Vec<String>> = candidates.iter().map(CandidateSet::signature).collect();

    // Any repeated signature wins; first set carrying it decides parameters.
    for (i, signature) in signatures.iter().enumerate() {
        let count = signatures.iter().filter(|s| *s == signature).count();
        if count >= 2 {
            return TurnOutcome::Decision(candidates[i].clone());
        }
    }

    // No repeats: consider only interpretations with no text mixed in.
    let mut distinct: Vec<usize> = Vec::new();
    for (i, set) in candidates.iter().enumerate() {
        if set.has_text() {
            continue;
        }
        if distinct.iter().all(|&j| signatures[j] != signatures[i]) {
            distinct.push(i);
        }
    }

    match distinct.len() {
        // Every set mixes text and commands; prefer a chat-flavored answer
        // over a hard failure.
        0 => TurnOutcome::Decision(candidates.into_iter().next().unwrap_or_default()),
        1 => TurnOutcome::Decision(candidates[distinct[0]].clone()),
        _ => TurnOutcome::Ambiguous(
            distinct.into_iter().map(|i| candidates[i].clone()).collect(),
        ),
    }
}
