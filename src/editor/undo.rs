//! Sparse undo for committed brush strokes.
//!
//! A single in-memory stack, scoped to the currently selected mesh label;
//! changing the selection resets it. Each entry records the previous value
//! of every voxel a commit actually changed.

use crate::volume::grid::LabelGrid;

/// Previous values of the voxels one commit overwrote.
#[derive(Clone, Debug, Default)]
pub struct CommitDelta {
    /// (flat index, value before the commit)
    changes: Vec<(usize, u8)>,
}

impl CommitDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize, previous: u8) {
        self.changes.push((index, previous));
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Undo history for brush commits.
#[derive(Debug, Default)]
pub struct UndoStack {
    scope: Option<u8>,
    stack: Vec<CommitDelta>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the history currently applies to.
    pub fn scope(&self) -> Option<u8> {
        self.scope
    }

    /// Re-scope the history to a newly selected mesh, dropping prior
    /// entries. Re-selecting the same label keeps them.
    pub fn set_scope(&mut self, label: Option<u8>) {
        if self.scope != label {
            self.scope = label;
            self.stack.clear();
        }
    }

    /// Push a commit's delta. Empty deltas (nothing actually changed) are
    /// not recorded.
    pub fn push(&mut self, delta: CommitDelta) {
        if !delta.is_empty() {
            self.stack.push(delta);
        }
    }

    /// Restore the label grid to its state before the latest commit.
    pub fn undo(&mut self, labels: &mut LabelGrid) -> bool {
        let Some(delta) = self.stack.pop() else {
            return false;
        };
        let data = labels.data_mut();
        for &(index, previous) in &delta.changes {
            data[index] = previous;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::volume::grid::{GridDims, LabelGrid};

    fn grid() -> LabelGrid {
        LabelGrid::new(GridDims::new(4, 4, 4), Vec3::ONE).unwrap()
    }

    #[test]
    fn test_undo_restores_previous_values() {
        let mut labels = grid();
        labels.set(0, 0, 0, 2);

        let mut delta = CommitDelta::new();
        let idx = labels.dims().index(0, 0, 0);
        delta.record(idx, labels.data()[idx]);
        labels.data_mut()[idx] = 9;

        let mut undo = UndoStack::new();
        undo.push(delta);
        assert!(undo.undo(&mut labels));
        assert_eq!(labels.get(0, 0, 0), 2);
        assert!(undo.is_empty());
    }

    #[test]
    fn test_undo_on_empty_stack() {
        let mut labels = grid();
        let mut undo = UndoStack::new();
        assert!(!undo.undo(&mut labels));
    }

    #[test]
    fn test_scope_change_clears_history() {
        let mut undo = UndoStack::new();
        let mut delta = CommitDelta::new();
        delta.record(0, 1);
        undo.set_scope(Some(1));
        undo.push(delta);
        assert_eq!(undo.len(), 1);

        undo.set_scope(Some(2));
        assert!(undo.is_empty());
    }

    #[test]
    fn test_reselecting_same_scope_keeps_history() {
        let mut undo = UndoStack::new();
        let mut delta = CommitDelta::new();
        delta.record(0, 1);
        undo.set_scope(Some(1));
        undo.push(delta);

        undo.set_scope(Some(1));
        assert_eq!(undo.len(), 1);
    }

    #[test]
    fn test_empty_delta_not_recorded() {
        let mut undo = UndoStack::new();
        undo.push(CommitDelta::new());
        assert!(undo.is_empty());
    }
}
