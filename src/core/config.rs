//! Configuration knobs recognized by the viewer core.

use serde::{Deserialize, Serialize};

/// Brush configuration for mask painting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Brush radius in voxels. Clamped to at least 1 on use.
    pub radius: i32,
    /// Label value written for painted voxels.
    pub paint_label: u8,
    /// Opacity of the drawing overlay while painting.
    pub draw_opacity: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            paint_label: 1,
            draw_opacity: 0.6,
        }
    }
}

/// Camera bridge configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Calibration distance at which the volumetric scale multiplier is 1.0.
    pub reference_distance: f32,
    /// Interval between camera-ready poll attempts, in milliseconds.
    pub poll_interval_ms: u64,
    /// Maximum number of poll attempts before binding anyway.
    pub max_poll_attempts: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            reference_distance: 600.0,
            poll_interval_ms: 200,
            max_poll_attempts: 30,
        }
    }
}

/// Bounding-fit camera placement configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitConfig {
    /// Margin factor applied to the computed framing distance.
    pub margin: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { margin: 1.5 }
    }
}

/// Top-level configuration for a viewer session.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub brush: BrushConfig,
    pub bridge: BridgeConfig,
    pub fit: FitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calibration() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.bridge.reference_distance, 600.0);
        assert_eq!(cfg.bridge.poll_interval_ms, 200);
        assert_eq!(cfg.bridge.max_poll_attempts, 30);
        assert_eq!(cfg.fit.margin, 1.5);
        assert!(cfg.brush.radius >= 1);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = ViewerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ViewerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.brush.paint_label, cfg.brush.paint_label);
        assert_eq!(back.bridge.max_poll_attempts, cfg.bridge.max_poll_attempts);
    }
}
