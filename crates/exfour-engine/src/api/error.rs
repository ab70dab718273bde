use thiserror::Error;

use crate::api::types::{PlanetId, ShipId};

/// Failures of the orbital slot operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrbitError {
    #[error("{0} does not exist")]
    UnknownPlanet(PlanetId),
    #[error("{0} does not exist")]
    UnknownShip(ShipId),
    /// Every slot inside the planet's orbital envelope is taken.
    #[error("no free orbital slot around {planet}")]
    NoSlot { planet: String },
    /// The ship already holds a slot; it must leave orbit first.
    #[error("{ship} already orbits {planet}")]
    AlreadyOrbiting { ship: ShipId, planet: PlanetId },
}

/// Reasons a fleet transfer order sends nobody.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("a planet cannot send a fleet to itself")]
    SelfTarget,
    #[error("{0} does not exist")]
    UnknownPlanet(PlanetId),
    /// Half the origin's fleet rounds down to zero ships.
    #[error("{planet} has no ships to send")]
    NoShipsAvailable { planet: String },
    /// The destination has no free slot to reserve.
    #[error("{planet} has no room for more ships")]
    TargetFull { planet: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ZoomError {
    #[error("stiffness must be in (0, 1], got {0}")]
    InvalidStiffness(f32),
}

/// Problems building a scene from a scenario description.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("planet {name:?} has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },
    #[error("selected planet {0:?} is not part of the scenario")]
    UnknownSelection(String),
    #[error(transparent)]
    Zoom(#[from] ZoomError),
}
