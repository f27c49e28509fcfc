//! Consensus voting over candidate sets.

pub mod outcome;
pub mod voter;
