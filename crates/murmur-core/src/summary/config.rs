//! Summary configuration and display state.

use crate::CoreError;

/// Tunables for membership summarisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Maximum names spelled out in each of the join and leave lists.
    pub summary_length: usize,
    /// Maximum avatars shown in the collapsed summary.
    pub avatars_max_length: usize,
    /// Minimum number of events that triggers summarisation.
    pub threshold: usize,
}

impl SummaryConfig {
    /// Check the configuration is usable.
    ///
    /// A zero `summary_length` would leave no name to end a list on.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.summary_length == 0 {
            return Err(CoreError::InvalidConfig("summary_length must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { summary_length: 3, avatars_max_length: 5, threshold: 3 }
    }
}

/// Per-instance display state of a summary.
///
/// Owned by whoever hosts the summary and fed back into
/// [`super::MemberEventListSummary::render`]. A fresh summary starts
/// collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryState {
    /// User asked to see every event.
    pub expanded: bool,
}

impl SummaryState {
    /// Flip between collapsed and expanded.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.summary_length, 3);
        assert_eq!(config.avatars_max_length, 5);
        assert_eq!(config.threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_summary_length_rejected() {
        let config = SummaryConfig { summary_length: 0, ..SummaryConfig::default() };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn toggle_flips() {
        let mut state = SummaryState::default();
        assert!(!state.expanded);
        state.toggle();
        assert!(state.expanded);
        state.toggle();
        assert!(!state.expanded);
    }
}
