//! Per-structure mesh instances extracted from the label volume.

use crate::math::Aabb;

/// How the mesh material blends with what is behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blending {
    None,
    Normal,
}

/// Material state of a mesh surface.
///
/// The auxiliary flags always follow the opacity relative to the
/// fully-opaque threshold of 1.0; [`Material::apply_opacity`] keeps them
/// consistent and is idempotent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    pub blending: Blending,
}

impl Material {
    /// Fully opaque material in the given color.
    pub fn opaque(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            blending: Blending::None,
        }
    }

    /// Set opacity and toggle the auxiliary flags consistently.
    pub fn apply_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        if self.opacity < 1.0 {
            self.transparent = true;
            self.depth_write = false;
            self.blending = Blending::Normal;
        } else {
            self.transparent = false;
            self.depth_write = true;
            self.blending = Blending::None;
        }
    }
}

/// One extracted surface mesh. The label in its metadata is authoritative
/// for every lookup; display order means nothing.
#[derive(Clone, Debug)]
pub struct MeshInstance {
    /// Label value of the structure this mesh was extracted from.
    pub label: u8,
    /// Human-readable structure name, when known.
    pub name: Option<String>,
    /// World-space bounding box; `None` for meshes without geometry.
    pub bounds: Option<Aabb>,
    pub material: Material,
    pub visible: bool,
}

impl MeshInstance {
    pub fn new(label: u8, bounds: Option<Aabb>, material: Material) -> Self {
        Self {
            label,
            name: None,
            bounds,
            material,
            visible: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
