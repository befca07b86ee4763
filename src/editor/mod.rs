//! Interactive mask editing: the brush state machine and the commit undo
//! stack.

pub mod brush;
pub mod undo;

pub use brush::{BrushMaskEditor, BrushState, CommitReceipt};
pub use undo::{CommitDelta, UndoStack};
