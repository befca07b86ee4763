//! Capability ports onto the external renderers.
//!
//! The volumetric and mesh renderers are black-box collaborators; the core
//! reaches them only through these narrow traits. Feature support is
//! declared up front in [`RendererCaps`] rather than discovered at call
//! time.

use crate::camera::state::VolumetricCamera;
use crate::core::types::Vec3;
use crate::volume::mask::DrawMask;

/// Cursor location reported by a volumetric view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorLocation {
    /// Fractional voxel coordinate in the reference grid.
    pub vox: Vec3,
    /// Physical position in millimeters.
    pub mm: Vec3,
}

/// Renderer capabilities fixed at construction time.
#[derive(Clone, Copy, Debug)]
pub struct RendererCaps {
    /// Drag gestures can be routed to callbacks only, leaving the built-in
    /// crosshair drag behavior disabled while painting.
    pub callback_drag_mode: bool,
}

impl Default for RendererCaps {
    fn default() -> Self {
        Self {
            callback_drag_mode: true,
        }
    }
}

/// How the renderer routes pointer drags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    /// Built-in behavior: dragging moves the crosshair.
    #[default]
    Crosshair,
    /// Drags are delivered to location callbacks only; built-in
    /// navigation stays put while the brush paints.
    CallbackOnly,
}

/// The drawing surface a volumetric renderer exposes for mask painting.
///
/// Exactly the operations painting needs: overlay upload, enable/disable,
/// drag routing, and the orientation convention the brush relies on.
pub trait DrawableSurface {
    /// Capabilities declared when the renderer was constructed.
    fn caps(&self) -> RendererCaps;

    /// Turn interactive drawing on or off.
    fn set_drawing_enabled(&mut self, enabled: bool);

    /// Route drag gestures. Only meaningful when
    /// [`RendererCaps::callback_drag_mode`] is set.
    fn set_drag_mode(&mut self, mode: DragMode);

    /// Force radiological orientation so brush strokes land where the user
    /// points.
    fn set_radiological_convention(&mut self, enabled: bool);

    /// Opacity of the drawing overlay.
    fn set_draw_opacity(&mut self, opacity: f32);

    /// Re-upload the overlay texture from the mask. Visual feedback only;
    /// distinct from a volume-data refresh.
    fn refresh_drawing(&mut self, mask: &DrawMask);
}

/// Full volumetric renderer port.
pub trait VolumetricRenderer: DrawableSurface {
    /// Push a complete volumetric camera parameter set.
    fn set_camera(&mut self, camera: &VolumetricCamera);

    /// True once the renderer's own camera object has its eye/look-at
    /// fields populated.
    fn camera_ready(&self) -> bool;

    /// Redraw the view with current state.
    fn redraw(&mut self);

    /// Re-upload volume data after a committed label edit.
    fn refresh_volume(&mut self);
}
