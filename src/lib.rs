//! Segview - core engine for an interactive medical segmentation viewer
//!
//! Owns the shared voxel data model, brush-based mask editing, per-label
//! volume statistics, camera-model bridging between the mesh and volumetric
//! renderers, and linked-view synchronization. The renderers themselves are
//! external collaborators reached through the ports in [`view::ports`].

pub mod core;
pub mod math;
pub mod volume;
pub mod editor;
pub mod camera;
pub mod view;
pub mod scene;
pub mod session;
pub mod loader;
