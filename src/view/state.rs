//! View state
//!
//! The complete mutable state behind what the user sees.

use crate::models::Contributor;

/// Everything the renderer needs.
///
/// While `is_loading` is true, `result` is `None` and `error_message` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Current search input, editable at any time
    pub query_text: String,
    /// True only while a lookup is outstanding
    pub is_loading: bool,
    /// Empty when there is no error
    pub error_message: String,
    pub result: Option<Contributor>,
}

/// Coarse phase derived from a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing searched yet
    Idle,
    Loading,
    Success,
    Failed,
}

impl ViewState {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if !self.error_message.is_empty() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = ViewState::new("torvalds");
        assert_eq!(state.query_text, "torvalds");
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.has_error());
    }

    #[test]
    fn test_phase_follows_fields() {
        let mut state = ViewState::default();
        state.is_loading = true;
        assert_eq!(state.phase(), Phase::Loading);

        state.is_loading = false;
        state.error_message = "Failed to find contributor: Not Found".to_string();
        assert_eq!(state.phase(), Phase::Failed);
    }
}
