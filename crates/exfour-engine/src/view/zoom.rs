// view/zoom.rs
//
// Exponential zoom smoothing. The target jumps on wheel input; the bound
// camera eases toward it a fixed fraction per tick and listeners hear
// every change.

use crate::api::error::ZoomError;
use crate::core::math::clamp;
use crate::view::camera::Camera2D;

pub const MAX_ZOOM: f32 = 8.0;
pub const MIN_ZOOM: f32 = 0.04;

/// Anything exposing a mutable zoom scalar.
pub trait ZoomSink {
    fn zoom(&self) -> f32;
    fn set_zoom(&mut self, zoom: f32);
}

/// Handle returned by `register_zoom_listener`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(f32)>;

pub fn zoom_clamp(value: f32) -> f32 {
    clamp(value, MIN_ZOOM, MAX_ZOOM)
}

pub struct ZoomManager<C: ZoomSink = Camera2D> {
    target: f32,
    stiffness: f32,
    camera: Option<C>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
}

impl<C: ZoomSink> ZoomManager<C> {
    /// `stiffness` is the fraction of the remaining distance covered per
    /// tick and must lie in (0, 1].
    pub fn new(zoom: f32, stiffness: f32) -> Result<Self, ZoomError> {
        let mut manager = Self {
            target: zoom_clamp(zoom),
            stiffness: 1.0,
            camera: None,
            listeners: Vec::new(),
            next_listener: 0,
        };
        manager.set_stiffness(stiffness)?;
        Ok(manager)
    }

    pub fn with_camera(mut self, camera: C) -> Self {
        self.set_camera(Some(camera));
        self
    }

    /// Bind (or unbind) the zoom sink. A newly bound sink jumps straight to
    /// the target. Returns the previously bound sink.
    pub fn set_camera(&mut self, camera: Option<C>) -> Option<C> {
        let previous = std::mem::replace(&mut self.camera, camera);
        if let Some(camera) = self.camera.as_mut() {
            camera.set_zoom(self.target);
        }
        previous
    }

    pub fn camera(&self) -> Option<&C> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut C> {
        self.camera.as_mut()
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Zoom of the bound sink, if any.
    pub fn current(&self) -> Option<f32> {
        self.camera.as_ref().map(|c| c.zoom())
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn set_stiffness(&mut self, stiffness: f32) -> Result<(), ZoomError> {
        if stiffness > 0.0 && stiffness <= 1.0 {
            self.stiffness = stiffness;
            Ok(())
        } else {
            Err(ZoomError::InvalidStiffness(stiffness))
        }
    }

    pub fn set_zoom_target(&mut self, zoom: f32) {
        self.target = zoom_clamp(zoom);
    }

    /// Scale the target by `1 - amount` (positive zooms out).
    pub fn zoom(&mut self, amount: f32) {
        if amount != 0.0 {
            self.set_zoom_target(self.target * (1.0 - amount));
        }
    }

    /// The listener hears the current zoom right away when a sink is bound.
    pub fn register_zoom_listener(&mut self, mut listener: impl FnMut(f32) + 'static) -> ListenerId {
        if let Some(zoom) = self.current() {
            listener(zoom);
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unregister_zoom_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Ease the bound sink toward the target. Returns the new zoom when it changed.
    pub fn handle_zoom(&mut self) -> Option<f32> {
        let camera = self.camera.as_mut()?;
        let current = camera.zoom();
        let diff = self.target - current;
        if diff == 0.0 {
            return None;
        }
        let next = if diff.abs() > MIN_ZOOM / 2.0 {
            zoom_clamp(current + diff * self.stiffness)
        } else {
            self.target
        };
        camera.set_zoom(next);
        for (_, listener) in self.listeners.iter_mut() {
            listener(next);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Knob(f32);

    impl ZoomSink for Knob {
        fn zoom(&self) -> f32 {
            self.0
        }
        fn set_zoom(&mut self, zoom: f32) {
            self.0 = zoom;
        }
    }

    fn manager() -> ZoomManager<Knob> {
        ZoomManager::new(1.0, 0.3).unwrap().with_camera(Knob::default())
    }

    #[test]
    fn target_is_clamped() {
        let mut zm = manager();
        zm.set_zoom_target(100.0);
        assert_eq!(zm.target(), MAX_ZOOM);
        zm.set_zoom_target(0.0);
        assert_eq!(zm.target(), MIN_ZOOM);
    }

    #[test]
    fn zoom_scales_target() {
        let mut zm = manager();
        zm.zoom(0.5);
        assert!((zm.target() - 0.5).abs() < 1e-6);
        zm.zoom(-1.0);
        assert!((zm.target() - 1.0).abs() < 1e-6);
        zm.zoom(0.0);
        assert!((zm.target() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn binding_camera_jumps_to_target() {
        let zm = ZoomManager::new(3.0, 0.3).unwrap().with_camera(Knob(1.0));
        assert_eq!(zm.current(), Some(3.0));
    }

    #[test]
    fn invalid_stiffness_is_rejected() {
        assert!(matches!(
            ZoomManager::<Knob>::new(1.0, 0.0),
            Err(ZoomError::InvalidStiffness(_))
        ));
        assert!(ZoomManager::<Knob>::new(1.0, 1.5).is_err());
        assert!(ZoomManager::<Knob>::new(1.0, 1.0).is_ok());
        let mut zm = manager();
        assert!(zm.set_stiffness(-0.2).is_err());
        assert_eq!(zm.stiffness(), 0.3);
    }

    #[test]
    fn handle_zoom_converges_without_overshoot() {
        let mut zm = manager();
        zm.set_zoom_target(8.0);
        let mut previous = zm.current().unwrap();
        for _ in 0..200 {
            if let Some(z) = zm.handle_zoom() {
                assert!(z >= previous && z <= MAX_ZOOM, "{} after {}", z, previous);
                previous = z;
            }
        }
        assert_eq!(zm.current(), Some(8.0));
        assert_eq!(zm.handle_zoom(), None);

        zm.set_zoom_target(0.0);
        for _ in 0..200 {
            zm.handle_zoom();
            let z = zm.current().unwrap();
            assert!(z >= MIN_ZOOM);
        }
        assert_eq!(zm.current(), Some(MIN_ZOOM));
    }

    #[test]
    fn small_difference_snaps() {
        let mut zm = manager();
        zm.set_zoom_target(1.01);
        assert_eq!(zm.handle_zoom(), Some(1.01));
    }

    #[test]
    fn handle_zoom_without_camera_does_nothing() {
        let mut zm = ZoomManager::<Knob>::new(2.0, 0.5).unwrap();
        assert_eq!(zm.handle_zoom(), None);
        assert_eq!(zm.current(), None);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let mut zm = manager();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = log.clone();
        zm.register_zoom_listener(move |z| first.borrow_mut().push(("a", z)));
        let second = log.clone();
        let id = zm.register_zoom_listener(move |z| second.borrow_mut().push(("b", z)));
        // both heard the bound zoom on registration
        assert_eq!(*log.borrow(), vec![("a", 1.0), ("b", 1.0)]);

        log.borrow_mut().clear();
        zm.set_zoom_target(2.0);
        let z = zm.handle_zoom().unwrap();
        assert_eq!(*log.borrow(), vec![("a", z), ("b", z)]);

        assert!(zm.unregister_zoom_listener(id));
        assert!(!zm.unregister_zoom_listener(id));
        log.borrow_mut().clear();
        zm.handle_zoom();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn listener_without_camera_is_not_called_on_join() {
        let mut zm = ZoomManager::<Knob>::new(2.0, 0.5).unwrap();
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        zm.register_zoom_listener(move |_| *c.borrow_mut() += 1);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(zm.listener_count(), 1);
    }
}
