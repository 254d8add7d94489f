//! The set of turn numbers currently in superposition.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::TurnNumber;

/// Turn numbers whose pieces still occupy two candidate cells.
///
/// A turn number enters the set once both halves of its quantum move are on
/// the board and leaves it exactly when it collapses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumSet {
    turns: FxHashSet<TurnNumber>,
}

impl QuantumSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a completed quantum pair. Returns false if already present.
    pub fn insert(&mut self, turn: TurnNumber) -> bool {
        self.turns.insert(turn)
    }

    /// Drop a collapsed pair. Returns false if it was not present.
    pub fn remove(&mut self, turn: TurnNumber) -> bool {
        self.turns.remove(&turn)
    }

    #[must_use]
    pub fn contains(&self, turn: TurnNumber) -> bool {
        self.turns.contains(&turn)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Live turn numbers in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<TurnNumber> {
        let mut turns: Vec<_> = self.turns.iter().copied().collect();
        turns.sort_unstable();
        turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut set = QuantumSet::new();
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.contains(3));
        assert_eq!(set.len(), 1);

        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_sorted() {
        let mut set = QuantumSet::new();
        for turn in [9, 1, 5] {
            set.insert(turn);
        }
        assert_eq!(set.sorted(), vec![1, 5, 9]);

        set.clear();
        assert!(set.sorted().is_empty());
    }

    #[test]
    fn test_serde() {
        let mut set = QuantumSet::new();
        set.insert(2);
        set.insert(7);

        let json = serde_json::to_string(&set).unwrap();
        let back: QuantumSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
