//! Voxel data model: shared scan/segmentation grids, the scratch draw mask,
//! and per-label physical volume statistics.

pub mod grid;
pub mod mask;
pub mod stats;

pub use grid::{GridDims, LabelGrid, ScanGrid, VoxelGrid};
pub use mask::DrawMask;
pub use stats::{label_volumes, LabelVolumeRecord};
