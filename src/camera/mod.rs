//! Camera models and the bridge that keeps them synchronized.

pub mod state;
pub mod bridge;
pub mod fit;

pub use bridge::{CameraBridge, Readiness};
pub use fit::{fit_camera, CameraPlacement};
pub use state::{MeshCamera, VolumetricCamera};
