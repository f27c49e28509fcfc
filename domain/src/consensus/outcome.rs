//! Turn outcome types.

use crate::command::item::CandidateSet;
use serde::{Deserialize, Serialize};

/// Final result of one user turn
///
/// Created once per turn, returned immediately, never retained by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data")]
pub enum TurnOutcome {
    /// A single resolved interpretation
    Decision(CandidateSet),
    /// Multiple distinct valid interpretations the caller must surface to
    /// the user rather than guess between
    Ambiguous(Vec<CandidateSet>),
    /// No completion yielded anything actionable
    Empty,
}

impl TurnOutcome {
    pub fn is_decision(&self) -> bool {
        matches!(self, TurnOutcome::Decision(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, TurnOutcome::Ambiguous(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TurnOutcome::Empty)
    }

    /// The decided set, if this outcome is a decision
    pub fn decision(&self) -> Option<&CandidateSet> {
        match self {
            TurnOutcome::Decision(set) => Some(set),
            _ => None,
        }
    }

    /// The unresolved options, if this outcome is ambiguous
    pub fn options(&self) -> Option<&[CandidateSet]> {
        match self {
            TurnOutcome::Ambiguous(options) => Some(options),
            _ => None,
        }
    }
}
