//! Bounding-fit camera placement for the mesh view.
//!
//! Frames the union of the meshes' world-space bounding boxes, placing the
//! camera deliberately off-axis and elevated rather than straight-on.

use log::warn;

use crate::core::types::Vec3;
use crate::math::Aabb;

/// An eye/target pair produced by bounding-fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPlacement {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Compute a camera placement that frames the given bounding boxes.
///
/// Meshes without geometry contribute `None` and are skipped. An empty
/// input set or an empty union aborts with a warning and no placement, so
/// a zero-sized box never reaches the division below. `fov_y` is the
/// vertical field of view in radians; `margin` is the framing slack factor
/// (default 1.5).
pub fn fit_camera<I>(boxes: I, fov_y: f32, margin: f32) -> Option<CameraPlacement>
where
    I: IntoIterator<Item = Option<Aabb>>,
{
    let mut union = Aabb::empty();
    let mut seen = 0usize;
    for bounds in boxes {
        if let Some(b) = bounds {
            union = union.merged(&b);
        }
        seen += 1;
    }

    if seen == 0 {
        warn!("bounding-fit: no meshes to frame");
        return None;
    }
    if union.is_empty() {
        warn!("bounding-fit: bounding box union is empty");
        return None;
    }

    let center = union.center();
    let max_dim = union.largest_extent();

    let mut camera_z = (max_dim / 2.0 / (fov_y / 2.0).tan()).abs();
    camera_z *= margin;

    // Off-axis elevated viewpoint: half the framing distance sideways and up.
    let eye = center + Vec3::new(0.5 * camera_z, 0.5 * camera_z, camera_z);

    Some(CameraPlacement { eye, target: center })
}
