//! Mesh scene state: per-label mesh instances and the selection registry.

pub mod mesh;
pub mod registry;

pub use mesh::{Blending, Material, MeshInstance};
pub use registry::{HighlightBox, MeshRegistry};
