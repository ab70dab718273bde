pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod assets;
pub mod view;

// Re-export key types at crate root for convenience
pub use api::types::{PlanetId, ShipId, SimEvent};
pub use api::config::{SimConfig, ZoomConfig};
pub use api::error::{DispatchError, OrbitError, ScenarioError, ZoomError};
pub use core::scene::{OrbitRef, Scene};
pub use core::time::FixedTimestep;
pub use components::orbit::{OrbitPath, SlotCoord};
pub use components::planet::Planet;
pub use components::ship::{Motion, Ship, ShipState};
pub use input::queue::{Command, CommandQueue};
pub use assets::scenario::{PlanetDescriptor, Scenario};
pub use view::camera::Camera2D;
pub use view::zoom::{ListenerId, ZoomManager, ZoomSink, MAX_ZOOM, MIN_ZOOM};
