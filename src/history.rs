//! Snapshot history backing step-back.
//!
//! An append/pop-only stack: every forward step pushes the pre-step state,
//! every step-back pops one snapshot. Snapshots are small scalar records, so
//! the stack stays cheap even over long runs.

/// Ordered sequence of prior machine states.
#[derive(Debug, Clone, Default)]
pub struct StepHistory<S> {
    snapshots: Vec<S>,
}

impl<S> StepHistory<S> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Record the state that the next step is about to leave behind.
    pub fn push(&mut self, snapshot: S) {
        self.snapshots.push(snapshot);
    }

    /// Take back the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<S> {
        self.snapshots.pop()
    }

    /// Number of steps that can currently be undone.
    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop all snapshots. Used on reset and on pattern/text change.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::StepHistory;

    #[test]
    fn push_pop_is_lifo() {
        let mut h = StepHistory::new();
        h.push(1);
        h.push(2);
        h.push(3);
        assert_eq!(h.len(), 3);
        assert_eq!(h.pop(), Some(3));
        assert_eq!(h.pop(), Some(2));
        assert_eq!(h.pop(), Some(1));
        assert_eq!(h.pop(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut h = StepHistory::new();
        h.push("a");
        h.push("b");
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.pop(), None);
    }
}
