use glam::Vec2;

use crate::view::zoom::{zoom_clamp, ZoomSink};

/// 2D camera over the simulation plane.
/// Zoom > 1 magnifies: the visible world extent is `viewport / zoom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Camera center position in world space.
    pub center: Vec2,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    /// Screen pixels per world unit, always within [MIN_ZOOM, MAX_ZOOM].
    zoom: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            viewport: Vec2::new(width, height),
            zoom: 1.0,
        }
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// World-space size of the visible area.
    pub fn visible_size(&self) -> Vec2 {
        self.viewport / self.zoom
    }

    /// Move camera center to the target position.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.center) * self.zoom + self.viewport / 2.0
    }

    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        (point - self.viewport / 2.0) / self.zoom + self.center
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let half = self.visible_size() / 2.0;
        (point - self.center).abs().cmple(half).all()
    }
}

impl ZoomSink for Camera2D {
    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom_clamp(zoom);
    }
}
