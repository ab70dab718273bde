use serde::{Deserialize, Serialize};

/// Simulation configuration. Every field has a default so scenario files
/// only need to mention what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Ship transit speed in world units per second (default: 100).
    pub transit_speed: f32,
    /// Ships created per debug spawn order (default: 25).
    pub spawn_batch: usize,
    /// Camera zoom behaviour.
    pub zoom: ZoomConfig,
    /// Viewport size in screen pixels, used for the camera's visible extent.
    pub viewport: [f32; 2],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            transit_speed: 100.0,
            spawn_batch: 25,
            zoom: ZoomConfig::default(),
            viewport: [1280.0, 720.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Starting zoom target.
    pub initial: f32,
    /// Fraction of the remaining distance covered per tick, in (0, 1].
    pub stiffness: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: 1.0,
            stiffness: 0.34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_zoom_keeps_other_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "zoom": { "stiffness": 0.5 }, "spawn_batch": 3 }"#).unwrap();
        assert_eq!(config.spawn_batch, 3);
        assert_eq!(config.zoom.stiffness, 0.5);
        assert_eq!(config.zoom.initial, 1.0);
        assert_eq!(config.transit_speed, 100.0);
    }
}
