//! The two camera parametrizations of the shared physical viewpoint.
//!
//! The mesh renderer uses a Cartesian eye/target model, the volumetric
//! renderer a spherical azimuth/elevation/distance model. Conversion lives
//! here, in one place, so both views always depict the same viewpoint.

use crate::core::types::Vec3;

/// Below this eye-to-target distance the viewpoint is treated as degenerate.
const MIN_DISTANCE: f32 = 1e-6;

/// Cartesian camera of the mesh renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCamera {
    pub eye: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl MeshCamera {
    pub fn new(eye: Vec3, look_at: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            eye,
            look_at,
            fov_y: fov_y_degrees.to_radians(),
        }
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.look_at).length()
    }
}

/// Spherical camera of the volumetric renderer, plus the explicit eye pair
/// so both models stay simultaneously consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumetricCamera {
    /// Degrees, normalized into [0, 360).
    pub azimuth_deg: f32,
    /// Degrees.
    pub elevation_deg: f32,
    /// Eye-to-target distance, always > 0.
    pub distance: f32,
    /// Perceived-size correction relative to the calibration distance.
    pub scale_multiplier: f32,
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl VolumetricCamera {
    /// Convert a mesh camera into volumetric parameters.
    ///
    /// Returns `None` for a degenerate eye == look-at pair rather than
    /// letting NaN or a zero distance reach renderer state. The azimuth
    /// normalization `(360 - az + 360) % 360` encodes the opposite
    /// handedness of the two models and must not be simplified.
    pub fn from_mesh(mesh: &MeshCamera, reference_distance: f32) -> Option<Self> {
        let offset = mesh.eye - mesh.look_at;
        let distance = offset.length();
        if !distance.is_finite() || distance <= MIN_DISTANCE {
            return None;
        }
        let dir = offset / distance;

        let azimuth = dir.x.atan2(dir.z).to_degrees();
        let azimuth_deg = (360.0 - azimuth + 360.0) % 360.0;
        // Clamp guards against floating-point drift pushing |dir.y| past 1.
        let elevation_deg = dir.y.clamp(-1.0, 1.0).asin().to_degrees();

        Some(Self {
            azimuth_deg,
            elevation_deg,
            distance,
            scale_multiplier: reference_distance / distance,
            eye: mesh.eye,
            look_at: mesh.look_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    fn convert(eye: Vec3, look_at: Vec3) -> VolumetricCamera {
        let mesh = MeshCamera::new(eye, look_at, 45.0);
        VolumetricCamera::from_mesh(&mesh, 600.0).unwrap()
    }

    #[test]
    fn test_eye_along_positive_z() {
        // dir = (0,0,1): azimuth 0, normalized (360-0+360)%360 = 0
        let cam = convert(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        assert!(cam.azimuth_deg.abs() < TOL);
        assert!(cam.elevation_deg.abs() < TOL);
        assert!((cam.distance - 100.0).abs() < TOL);
        assert!((cam.scale_multiplier - 6.0).abs() < TOL);
    }

    #[test]
    fn test_eye_along_positive_x() {
        // dir = (1,0,0): atan2(1,0) = 90, normalized to 270
        let cam = convert(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);
        assert!((cam.azimuth_deg - 270.0).abs() < TOL);
        assert!(cam.elevation_deg.abs() < TOL);
        assert!((cam.distance - 100.0).abs() < TOL);
    }

    #[test]
    fn test_eye_above_target() {
        // dir = (0,1,0): elevation 90, azimuth atan2(0,0) = 0 -> 0
        let cam = convert(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO);
        assert!((cam.elevation_deg - 90.0).abs() < TOL);
        assert!(cam.azimuth_deg.abs() < TOL);
        assert!((cam.distance - 50.0).abs() < TOL);
        assert!((cam.scale_multiplier - 12.0).abs() < TOL);
    }

    #[test]
    fn test_offset_target() {
        // Same direction as +Z case but translated; target carried through.
        let cam = convert(Vec3::new(10.0, 20.0, 130.0), Vec3::new(10.0, 20.0, 30.0));
        assert!(cam.azimuth_deg.abs() < TOL);
        assert!((cam.distance - 100.0).abs() < TOL);
        assert_eq!(cam.look_at, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(cam.eye, Vec3::new(10.0, 20.0, 130.0));
    }

    #[test]
    fn test_negative_x_wraps_into_range() {
        // dir = (-1,0,0): atan2(-1,0) = -90, normalized (360+90+360)%360 = 90
        let cam = convert(Vec3::new(-100.0, 0.0, 0.0), Vec3::ZERO);
        assert!((cam.azimuth_deg - 90.0).abs() < TOL);
        assert!(cam.azimuth_deg >= 0.0 && cam.azimuth_deg < 360.0);
    }

    #[test]
    fn test_degenerate_pair_refused() {
        let mesh = MeshCamera::new(Vec3::splat(5.0), Vec3::splat(5.0), 45.0);
        assert!(VolumetricCamera::from_mesh(&mesh, 600.0).is_none());
    }

    #[test]
    fn test_no_nan_near_vertical() {
        // Slight drift above unit length must not produce NaN elevation.
        let cam = convert(Vec3::new(1e-8, 100.0, 1e-8), Vec3::ZERO);
        assert!(cam.elevation_deg.is_finite());
        assert!((cam.elevation_deg - 90.0).abs() < 1e-2);
    }
}
