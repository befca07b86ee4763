//! Brush mask editor: pointer gestures to voxel-precise label edits.
//!
//! State machine: `Idle` (painting off) -> `Armed` (painting on, no active
//! stroke) -> `Stroking` (pointer held) -> back to `Armed` on release or
//! pointer-leave, back to `Idle` on toggle-off. Paint accumulates in the
//! scratch [`DrawMask`]; the segmentation grid is mutated only by the
//! commit that runs on pointer-up.

use log::{debug, warn};

use crate::core::config::BrushConfig;
use crate::editor::undo::{CommitDelta, UndoStack};
use crate::view::ports::{CursorLocation, DragMode, DrawableSurface, VolumetricRenderer};
use crate::volume::grid::{GridDims, LabelGrid};
use crate::volume::mask::DrawMask;

/// Painting mode state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushState {
    Idle,
    Armed,
    Stroking,
}

/// Summary of one committed stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Voxels painted in the mask at commit time.
    pub painted_voxels: usize,
    /// Voxels whose label value actually changed.
    pub changed_voxels: usize,
}

/// Converts drag gestures on the volumetric canvas into label-grid edits.
pub struct BrushMaskEditor {
    config: BrushConfig,
    state: BrushState,
    /// Dimensions of the reference anatomical grid; stroke centers outside
    /// these bounds are ignored.
    reference_dims: Option<GridDims>,
    mask: Option<DrawMask>,
}

impl BrushMaskEditor {
    pub fn new(config: BrushConfig) -> Self {
        Self {
            config,
            state: BrushState::Idle,
            reference_dims: None,
            mask: None,
        }
    }

    pub fn state(&self) -> BrushState {
        self.state
    }

    pub fn mask(&self) -> Option<&DrawMask> {
        self.mask.as_ref()
    }

    /// Brush radius in voxels, clamped to at least 1 when painting.
    pub fn set_radius(&mut self, radius: i32) {
        self.config.radius = radius;
    }

    pub fn set_paint_label(&mut self, label: u8) {
        self.config.paint_label = label;
    }

    /// Enter painting mode.
    ///
    /// Creates a zeroed mask over the reference topology, enables the
    /// drawing overlay, routes drags to callbacks where the renderer
    /// supports it, and forces radiological orientation so strokes land
    /// where the user points. Arming while already armed just re-zeroes.
    pub fn arm(&mut self, reference: GridDims, surface: &mut dyn DrawableSurface) {
        let mask = DrawMask::new(reference);
        if surface.caps().callback_drag_mode {
            surface.set_drag_mode(DragMode::CallbackOnly);
        } else {
            warn!("renderer cannot route drags to callbacks; strokes may also move the crosshair");
        }
        surface.set_drawing_enabled(true);
        surface.set_radiological_convention(true);
        surface.set_draw_opacity(self.config.draw_opacity);
        surface.refresh_drawing(&mask);

        self.reference_dims = Some(reference);
        self.mask = Some(mask);
        self.state = BrushState::Armed;
        debug!("brush armed over {:?}", reference);
    }

    /// Leave painting mode, discarding any uncommitted paint.
    pub fn disarm(&mut self, surface: &mut dyn DrawableSurface) {
        if let Some(mask) = self.mask.as_mut() {
            mask.clear();
            surface.refresh_drawing(mask);
        }
        surface.set_drawing_enabled(false);
        if surface.caps().callback_drag_mode {
            surface.set_drag_mode(DragMode::Crosshair);
        }

        self.mask = None;
        self.reference_dims = None;
        self.state = BrushState::Idle;
    }

    /// Pointer pressed over the rendering surface.
    pub fn pointer_down(&mut self) {
        match self.state {
            BrushState::Armed => self.state = BrushState::Stroking,
            BrushState::Stroking => {}
            BrushState::Idle => warn!("pointer down while painting mode is off; ignored"),
        }
    }

    /// Pointer left the canvas: the stroke stops so paint cannot follow the
    /// cursor outside. Accumulated paint stays in the mask for the next
    /// commit.
    pub fn pointer_leave(&mut self) {
        if self.state == BrushState::Stroking {
            self.state = BrushState::Armed;
        }
    }

    /// Cursor location update during a stroke.
    ///
    /// Floors the reported voxel coordinate; centers outside the reference
    /// grid are ignored without error. Otherwise paints a filled sphere of
    /// the configured radius and refreshes the drawing overlay (visual
    /// feedback only; no data commit).
    pub fn on_location_change(&mut self, loc: &CursorLocation, surface: &mut dyn DrawableSurface) {
        if self.state != BrushState::Stroking {
            return;
        }
        let (Some(dims), Some(mask)) = (self.reference_dims, self.mask.as_mut()) else {
            warn!("stroke update without an active mask; painting unavailable");
            return;
        };

        let x = loc.vox.x.floor() as i64;
        let y = loc.vox.y.floor() as i64;
        let z = loc.vox.z.floor() as i64;
        if !dims.contains(x, y, z) {
            return;
        }

        let center = glam::IVec3::new(x as i32, y as i32, z as i32);
        mask.paint_sphere(center, self.config.radius.max(1), self.config.paint_label);
        surface.refresh_drawing(mask);
    }

    /// Pointer released: commit the mask into the segmentation grid.
    ///
    /// Every mask voxel with a value > 0 overwrites the label grid at the
    /// same index with the paint label. This is the only point where
    /// painting mutates the label grid; all writes land before the volume
    /// refresh fires, so a redraw never observes a partial commit. The
    /// previous value of each changed voxel is recorded on the undo stack.
    pub fn pointer_up(
        &mut self,
        labels: &mut LabelGrid,
        renderer: &mut dyn VolumetricRenderer,
        undo: &mut UndoStack,
    ) -> Option<CommitReceipt> {
        if self.state != BrushState::Stroking {
            return None;
        }
        self.state = BrushState::Armed;

        let Some(mask) = self.mask.as_ref() else {
            warn!("pointer up without an active mask; nothing to commit");
            return None;
        };
        if labels.dims() != mask.dims() {
            warn!("mask topology no longer matches the segmentation grid; commit skipped");
            return None;
        }

        let paint_label = self.config.paint_label;
        let mut delta = CommitDelta::new();
        let mut painted_voxels = 0;

        let data = labels.data_mut();
        for idx in mask.painted() {
            painted_voxels += 1;
            let previous = data[idx];
            if previous != paint_label {
                delta.record(idx, previous);
                data[idx] = paint_label;
            }
        }
        let changed_voxels = delta.len();
        undo.push(delta);

        renderer.refresh_volume();

        debug!(
            "stroke committed: {} painted, {} changed",
            painted_voxels, changed_voxels
        );
        Some(CommitReceipt {
            painted_voxels,
            changed_voxels,
        })
    }
}
