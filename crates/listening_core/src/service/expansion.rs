//! Per-point expand/collapse flags.
//!
//! # Responsibility
//! - Track which points show their full quotation list.
//!
//! # Invariants
//! - Keys are source positions, so re-ranking never moves a flag onto a
//!   different point.
//! - Absent keys read as collapsed; the first toggle stores `true`.
//! - State is transient and owned by one session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identity of one point: positions in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointKey {
    pub theme: usize,
    pub summary: usize,
    pub point: usize,
}

impl PointKey {
    pub fn new(theme: usize, summary: usize, point: usize) -> Self {
        Self {
            theme,
            summary,
            point,
        }
    }
}

/// Expansion flags created lazily on first toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: HashMap<PointKey, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flag for `key`, `false` when never toggled.
    pub fn is_expanded(&self, key: PointKey) -> bool {
        self.flags.get(&key).copied().unwrap_or(false)
    }

    /// Flips the flag for `key` and returns the new value.
    pub fn toggle(&mut self, key: PointKey) -> bool {
        let flag = self.flags.entry(key).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Number of points currently expanded.
    pub fn expanded_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag).count()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpansionState, PointKey};

    #[test]
    fn unknown_key_reads_collapsed_and_first_toggle_expands() {
        let mut state = ExpansionState::new();
        let key = PointKey::new(9, 9, 9);
        assert!(!state.is_expanded(key));
        assert!(state.toggle(key));
        assert!(state.is_expanded(key));
    }

    #[test]
    fn toggles_are_independent_per_key() {
        let mut state = ExpansionState::new();
        state.toggle(PointKey::new(0, 1, 0));
        assert!(!state.is_expanded(PointKey::new(0, 0, 1)));
        assert!(!state.is_expanded(PointKey::new(1, 0, 0)));
        assert_eq!(state.expanded_count(), 1);

        assert!(!state.toggle(PointKey::new(0, 1, 0)));
        assert_eq!(state.expanded_count(), 0);
    }
}
