//! Mesh-label registry and selection state.
//!
//! Meshes arrive from the extraction step in arbitrary order and are
//! indexed by the label in their metadata. Selection is exclusive: at most
//! one mesh is selected, and exactly one highlight decoration exists in
//! the scene at a time, the old one removed before the new one is added.

use std::collections::BTreeMap;

use log::warn;

use crate::math::Aabb;
use crate::scene::mesh::MeshInstance;

/// Bounding-box decoration around the selected mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightBox {
    pub label: u8,
    pub bounds: Aabb,
}

/// Label-keyed registry of mesh instances plus selection state.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: BTreeMap<u8, MeshInstance>,
    selected: Option<u8>,
    highlight: Option<HighlightBox>,
}

impl MeshRegistry {
    /// Index meshes by their label metadata. A duplicate label replaces the
    /// earlier mesh with a warning; each label owns exactly one instance.
    pub fn build(meshes: impl IntoIterator<Item = MeshInstance>) -> Self {
        let mut map = BTreeMap::new();
        for mesh in meshes {
            if map.insert(mesh.label, mesh).is_some() {
                warn!("duplicate mesh label; keeping the later instance");
            }
        }
        Self {
            meshes: map,
            selected: None,
            highlight: None,
        }
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn get(&self, label: u8) -> Option<&MeshInstance> {
        self.meshes.get(&label)
    }

    pub fn get_mut(&mut self, label: u8) -> Option<&mut MeshInstance> {
        self.meshes.get_mut(&label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshInstance> {
        self.meshes.values()
    }

    /// World-space bounds per mesh, in registry order, for bounding-fit.
    pub fn bounds(&self) -> impl Iterator<Item = Option<Aabb>> + '_ {
        self.meshes.values().map(|m| m.bounds)
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// The single live highlight decoration, if any.
    pub fn highlight(&self) -> Option<&HighlightBox> {
        self.highlight.as_ref()
    }

    /// Select a mesh by label.
    ///
    /// Clears the prior highlight before installing the new bounding-box
    /// decoration. Selecting an unknown label is a warned no-op that leaves
    /// the prior selection intact. Returns the selected label on success.
    pub fn select(&mut self, label: u8) -> Option<u8> {
        let Some(mesh) = self.meshes.get(&label) else {
            warn!("select: no mesh registered for label {label}");
            return None;
        };

        // Old decoration goes away first; it is never left behind.
        self.highlight = None;
        self.selected = Some(label);
        if let Some(bounds) = mesh.bounds {
            self.highlight = Some(HighlightBox { label, bounds });
        } else {
            warn!("selected mesh {label} has no geometry; no highlight shown");
        }
        Some(label)
    }

    /// Drop selection and its decoration.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.highlight = None;
    }

    /// Apply an opacity value to a mesh's material. Idempotent; flags
    /// follow the opacity. Returns false for an unknown label.
    pub fn set_opacity(&mut self, label: u8, opacity: f32) -> bool {
        match self.meshes.get_mut(&label) {
            Some(mesh) => {
                mesh.material.apply_opacity(opacity);
                true
            }
            None => {
                warn!("set_opacity: no mesh registered for label {label}");
                false
            }
        }
    }

    /// Toggle or set mesh visibility. Returns the new visibility, or None
    /// for an unknown label.
    pub fn set_visible(&mut self, label: u8, visible: bool) -> Option<bool> {
        match self.meshes.get_mut(&label) {
            Some(mesh) => {
                mesh.visible = visible;
                Some(mesh.visible)
            }
            None => {
                warn!("set_visible: no mesh registered for label {label}");
                None
            }
        }
    }
}
