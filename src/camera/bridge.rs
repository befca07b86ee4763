//! Continuous mesh-to-volumetric camera synchronization.
//!
//! The volumetric renderer initializes its camera asynchronously, so the
//! bridge first waits for readiness: the renderer's `camera_ready` flag is
//! the primary signal, with a bounded attempt count (default 30 at 200 ms)
//! as the safety net. Each poll attempt forces a redraw, matching the
//! renderer's own warm-up behavior. Binding pushes the current mesh camera
//! once; after that every mesh-camera change is converted and pushed,
//! followed by a redraw. Binding happens exactly once per renderer
//! instance; re-arming is a no-op.

use std::time::Duration;

use log::{debug, warn};

use crate::camera::state::{MeshCamera, VolumetricCamera};
use crate::core::config::BridgeConfig;
use crate::view::ports::VolumetricRenderer;

/// Outcome of one readiness poll attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Camera fields not populated yet; poll again after the interval.
    Pending,
    /// Camera is ready; the bridge is bound.
    Ready,
    /// Attempt cap reached without readiness; bound anyway as a fallback.
    TimedOut,
}

/// Bridges the mesh renderer's camera into the volumetric renderer.
pub struct CameraBridge {
    config: BridgeConfig,
    attempts: u32,
    bound: bool,
}

impl CameraBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            attempts: 0,
            bound: false,
        }
    }

    /// Interval the host should wait between [`poll_ready`] attempts.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    /// True once the continuous-sync binding is installed.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// One readiness poll attempt.
    ///
    /// At the moment of binding the current mesh camera, when given, is
    /// pushed once so the volumetric view matches the mesh view before the
    /// first change notification arrives. Idempotent after binding: further
    /// calls return `Ready` without touching the renderer, so re-arming
    /// never installs a second binding or a second initial push.
    pub fn poll_ready(
        &mut self,
        mesh: Option<&MeshCamera>,
        renderer: &mut dyn VolumetricRenderer,
    ) -> Readiness {
        if self.bound {
            return Readiness::Ready;
        }

        renderer.redraw();
        self.attempts += 1;

        let readiness = if renderer.camera_ready() {
            debug!("camera bridge bound after {} poll attempts", self.attempts);
            self.bound = true;
            Readiness::Ready
        } else if self.attempts >= self.config.max_poll_attempts {
            warn!(
                "camera never reported ready after {} attempts; binding anyway",
                self.attempts
            );
            self.bound = true;
            Readiness::TimedOut
        } else {
            Readiness::Pending
        };

        if self.bound {
            if let Some(mesh) = mesh {
                self.sync(mesh, renderer);
            }
        }
        readiness
    }

    /// Forward one mesh-camera change into the volumetric renderer.
    ///
    /// Pushes azimuth/elevation/distance, the scale multiplier, and the
    /// explicit eye/look-at pair, then redraws. A degenerate eye == look-at
    /// pair is skipped with a warning. Returns the pushed parameters.
    pub fn sync(
        &mut self,
        mesh: &MeshCamera,
        renderer: &mut dyn VolumetricRenderer,
    ) -> Option<VolumetricCamera> {
        if !self.bound {
            warn!("camera sync requested before the bridge is bound; ignoring");
            return None;
        }

        let Some(cam) = VolumetricCamera::from_mesh(mesh, self.config.reference_distance) else {
            warn!("degenerate mesh camera (eye == look_at); sync skipped");
            return None;
        };

        renderer.set_camera(&cam);
        renderer.redraw();
        Some(cam)
    }
}
