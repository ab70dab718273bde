use std::fmt;

/// Unique identifier for a planet in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(pub u32);

/// Unique identifier for a ship in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u32);

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "planet#{}", self.0)
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}

/// Something the simulation wants the presentation layer to know about.
/// Collected during a tick and drained by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Selection changed (None = cleared).
    PlanetSelected(Option<PlanetId>),
    /// Ships left `from` and now hold reserved slots at `to`.
    FleetDispatched { from: PlanetId, to: PlanetId, ships: Vec<ShipId> },
    /// A transfer order was refused; the UI flashes the selection.
    DispatchRejected { from: PlanetId, to: PlanetId },
    /// A transiting ship snapped onto its reserved slot.
    ShipArrived { ship: ShipId, planet: PlanetId },
    /// Debug spawn finished: `spawned` entered orbit, `discarded` found no slot.
    ShipsSpawned { planet: PlanetId, spawned: usize, discarded: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_kind() {
        assert_eq!(PlanetId(3).to_string(), "planet#3");
        assert_eq!(ShipId(12).to_string(), "ship#12");
    }
}
