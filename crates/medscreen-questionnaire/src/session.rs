//! Questionnaire session state
//!
//! The state is a plain value owned by the caller. The engine reads it and
//! returns a new one from every transition; nothing is held process-wide.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of one user through the questionnaire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) current_step: usize,
    /// Hit count per condition; absent means zero
    pub(crate) scores: IndexMap<String, u32>,
}

impl SessionState {
    /// Rebuild a state the caller persisted elsewhere
    ///
    /// The questionnaire validates the parts on first use.
    pub fn from_parts(current_step: usize, scores: IndexMap<String, u32>) -> Self {
        Self {
            current_step,
            scores,
        }
    }

    /// Index of the next question to answer
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn scores(&self) -> &IndexMap<String, u32> {
        &self.scores
    }

    /// Accumulated hit count for a condition
    pub fn hits(&self, condition: &str) -> u32 {
        self.scores.get(condition).copied().unwrap_or(0)
    }
}

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the answer to question `step`
    Asking { step: usize, total: usize },
    Complete,
}

impl SessionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asking { step, total } => write!(f, "asking question {} of {}", step + 1, total),
            Self::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_default_to_zero() {
        let mut scores = IndexMap::new();
        scores.insert("cold".to_string(), 2);
        let state = SessionState::from_parts(10, scores);
        assert_eq!(state.hits("cold"), 2);
        assert_eq!(state.hits("dengue"), 0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Asking { step: 0, total: 12 }.to_string(), "asking question 1 of 12");
        assert_eq!(SessionStatus::Complete.to_string(), "complete");
    }

    #[test]
    fn test_state_serializes_for_caller_persistence() {
        let state = SessionState::from_parts(3, IndexMap::from([("diabetes".to_string(), 2)]));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"current_step":3,"scores":{"diabetes":2}}"#);
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
