use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::error::{DispatchError, OrbitError, ScenarioError};
use crate::api::types::{PlanetId, ShipId, SimEvent};
use crate::assets::scenario::Scenario;
use crate::components::orbit::SlotCoord;
use crate::components::planet::{valid_body_radius, Planet, ORBIT_MARGIN};
use crate::components::ship::{Motion, Ship};
use crate::input::queue::Command;
use crate::view::camera::Camera2D;
use crate::view::zoom::ZoomManager;

/// How a caller names the slot to vacate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitRef {
    Ship(ShipId),
    Slot(SlotCoord),
}

/// The simulation: every planet, every ship, the camera zoom and the
/// player's selection. Planets and ships live in flat Vecs in creation
/// order, which is also their update order.
pub struct Scene {
    config: SimConfig,
    scenario: Option<Scenario>,
    planets: Vec<Planet>,
    ships: Vec<Ship>,
    zoom: ZoomManager<Camera2D>,
    selected: Option<PlanetId>,
    events: Vec<SimEvent>,
    next_planet: u32,
    next_ship: u32,
}

impl Scene {
    /// Empty scene. Fails only if the zoom stiffness is out of range.
    pub fn new(config: SimConfig) -> Result<Self, ScenarioError> {
        let [width, height] = config.viewport;
        let zoom = ZoomManager::new(config.zoom.initial, config.zoom.stiffness)?
            .with_camera(Camera2D::new(width, height));
        Ok(Self {
            config,
            scenario: None,
            planets: Vec::new(),
            ships: Vec::with_capacity(256),
            zoom,
            selected: None,
            events: Vec::new(),
            next_planet: 1,
            next_ship: 1,
        })
    }

    /// Build a scene from a scenario; `Command::Restart` rebuilds from it.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, ScenarioError> {
        scenario.validate()?;
        let mut scene = Self::new(scenario.config.clone())?;
        scene.scenario = Some(scenario.clone());
        scene.populate(scenario)?;
        Ok(scene)
    }

    fn populate(&mut self, scenario: &Scenario) -> Result<(), ScenarioError> {
        for desc in &scenario.planets {
            let id = self.add_planet(&desc.name, Vec2::new(desc.x, desc.y), desc.radius)?;
            let mut discarded = 0;
            for _ in 0..desc.ships {
                if self.spawn_ship_at(id, 0.0).is_err() {
                    discarded += 1;
                }
            }
            if discarded > 0 {
                log::warn!("{}: {} starting ships did not fit in orbit", desc.name, discarded);
            }
        }
        if let Some(name) = &scenario.selected {
            let id = self.planets.iter().find(|p| &p.name == name).map(|p| p.id);
            self.select(id);
        }
        Ok(())
    }

    // -- Accessors --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn planet_by_name(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn zoom(&self) -> &ZoomManager<Camera2D> {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomManager<Camera2D> {
        &mut self.zoom
    }

    pub fn selected(&self) -> Option<PlanetId> {
        self.selected
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|p| p.id == id)
    }

    fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    // -- Lifecycle --

    /// Add a planet with the given body radius; its innermost shell sits
    /// just outside the body.
    pub fn add_planet(&mut self, name: &str, pos: Vec2, body_radius: f32) -> Result<PlanetId, ScenarioError> {
        if !valid_body_radius(body_radius) {
            return Err(ScenarioError::InvalidRadius {
                name: name.to_string(),
                radius: body_radius,
            });
        }
        let id = PlanetId(self.next_planet);
        self.next_planet += 1;
        let planet = Planet::new(id, name, pos, body_radius + ORBIT_MARGIN);
        log::info!("{}: added at {} with room for {} ships", name, pos, planet.capacity());
        self.planets.push(planet);
        Ok(id)
    }

    /// Remove a planet. Ships holding its slots are evicted and ships flying
    /// to it stop; all of them end up idle.
    pub fn remove_planet(&mut self, id: PlanetId) -> Option<Planet> {
        let idx = self.planets.iter().position(|p| p.id == id)?;
        let mut planet = self.planets.remove(idx);
        for (coord, ship_id) in planet.occupied().collect::<Vec<_>>() {
            planet.release_slot(coord);
            if let Some(ship) = self.ship_mut(ship_id) {
                ship.on_leave_orbit(id);
                if ship.attacking() == Some(id) {
                    ship.cancel_transit();
                }
            }
        }
        if self.selected == Some(id) {
            self.select(None);
        }
        log::info!("{}: removed", planet.name);
        Some(planet)
    }

    /// Spawn an idle ship in open space.
    pub fn spawn_ship(&mut self, pos: Vec2) -> ShipId {
        let id = ShipId(self.next_ship);
        self.next_ship += 1;
        let ship = Ship::new(id)
            .with_pos(pos)
            .with_transit_speed(self.config.transit_speed);
        self.ships.push(ship);
        id
    }

    /// Spawn a ship straight into orbit around `planet`, placed on its slot
    /// for `time`. A ship that gets no slot is discarded.
    pub fn spawn_ship_at(&mut self, planet: PlanetId, time: f64) -> Result<ShipId, OrbitError> {
        let pos = self.planet(planet).ok_or(OrbitError::UnknownPlanet(planet))?.pos();
        let id = self.spawn_ship(pos);
        match self.request_orbit(planet, id) {
            Ok(_) => {
                if let Some(idx) = self.ships.iter().position(|s| s.id == id) {
                    self.ships[idx].handle_orbit(time, &self.planets);
                }
                Ok(id)
            }
            Err(err) => {
                self.remove_ship(id);
                Err(err)
            }
        }
    }

    /// Remove a ship, releasing its slot first.
    pub fn remove_ship(&mut self, id: ShipId) -> bool {
        let Some(idx) = self.ships.iter().position(|s| s.id == id) else {
            return false;
        };
        if let Some(planet) = self.ships[idx].orbiting() {
            self.leave_orbit(planet, OrbitRef::Ship(id));
        }
        self.ships.swap_remove(idx);
        true
    }

    /// Teardown: every ship leaves orbit and is removed, then every planet;
    /// zoom listeners are dropped and id numbering starts over.
    pub fn clear(&mut self) {
        let ids: Vec<ShipId> = self.ships.iter().map(|s| s.id).collect();
        for id in ids {
            self.remove_ship(id);
        }
        self.planets.clear();
        self.zoom.clear_listeners();
        self.selected = None;
        self.events.clear();
        self.next_planet = 1;
        self.next_ship = 1;
    }

    /// Tear down and rebuild from the scenario (if the scene came from one).
    pub fn restart(&mut self) {
        self.clear();
        if let Some(scenario) = self.scenario.take() {
            log::info!("restarting scenario");
            if let Err(err) = self.populate(&scenario) {
                log::error!("restart failed: {}", err);
            }
            self.scenario = Some(scenario);
        }
    }

    // -- Orbital slots --

    /// Give `ship` the innermost free slot around `planet`.
    pub fn request_orbit(&mut self, planet: PlanetId, ship: ShipId) -> Result<SlotCoord, OrbitError> {
        let current = self.ship(ship).ok_or(OrbitError::UnknownShip(ship))?;
        if let Some(holding) = current.orbiting() {
            return Err(OrbitError::AlreadyOrbiting { ship, planet: holding });
        }
        let target = self
            .planets
            .iter_mut()
            .find(|p| p.id == planet)
            .ok_or(OrbitError::UnknownPlanet(planet))?;
        let (slot, path) = target.claim_slot(ship).ok_or_else(|| OrbitError::NoSlot {
            planet: target.name.clone(),
        })?;
        if let Some(s) = self.ship_mut(ship) {
            s.on_orbit(planet, slot, path);
        }
        Ok(slot)
    }

    /// Vacate a slot around `planet`. Returns false when nothing occupied it.
    pub fn leave_orbit(&mut self, planet: PlanetId, at: OrbitRef) -> bool {
        let coord = match at {
            OrbitRef::Slot(coord) => coord,
            OrbitRef::Ship(ship) => match self.ship(ship).and_then(|s| s.orbit()) {
                Some(orbit) if orbit.planet == planet => orbit.slot,
                _ => return false,
            },
        };
        let Some(ship) = self.planet_mut(planet).and_then(|p| p.release_slot(coord)) else {
            return false;
        };
        if let Some(s) = self.ship_mut(ship) {
            s.on_leave_orbit(planet);
        }
        true
    }

    // -- Fleet transfers --

    /// Send half of `from`'s fleet to `to`, capped by `to`'s free slots.
    /// The outermost ships go first. Each one reserves its destination slot
    /// immediately, so `to`'s ship count includes ships still in flight.
    pub fn dispatch_fleet(&mut self, from: PlanetId, to: PlanetId) -> Result<Vec<ShipId>, DispatchError> {
        if from == to {
            return Err(DispatchError::SelfTarget);
        }
        let origin = self.planet(from).ok_or(DispatchError::UnknownPlanet(from))?;
        let target = self.planet(to).ok_or(DispatchError::UnknownPlanet(to))?;

        let n = (origin.ship_count() / 2).min(target.free_capacity());
        if n == 0 {
            return Err(if origin.ship_count() / 2 == 0 {
                DispatchError::NoShipsAvailable { planet: origin.name.clone() }
            } else {
                DispatchError::TargetFull { planet: target.name.clone() }
            });
        }

        let picked = origin.select_outermost(n);
        let ships: Vec<ShipId> = picked.iter().map(|(_, id)| *id).collect();
        for (coord, _) in picked {
            self.leave_orbit(from, OrbitRef::Slot(coord));
        }
        for &ship in &ships {
            self.launch(ship, to);
        }

        log::info!(
            "{} ships dispatched from {} to {}",
            ships.len(),
            self.planet(from).map_or("?", |p| p.name.as_str()),
            self.planet(to).map_or("?", |p| p.name.as_str()),
        );
        self.events.push(SimEvent::FleetDispatched { from, to, ships: ships.clone() });
        Ok(ships)
    }

    /// Attack transition: reserve a slot at `target`, then fly there.
    fn launch(&mut self, ship: ShipId, target: PlanetId) {
        if let Err(err) = self.request_orbit(target, ship) {
            // dispatch checked free capacity before releasing anyone
            panic!("{} was sent to {} but could not reserve a slot: {}", ship, target, err);
        }
        let Some(target_pos) = self.planet(target).map(|p| p.pos()) else {
            return;
        };
        if let Some(s) = self.ship_mut(ship) {
            s.begin_transit(target, target_pos);
        }
    }

    // -- Selection --

    pub fn select(&mut self, planet: Option<PlanetId>) {
        if self.selected != planet {
            self.selected = planet;
            self.events.push(SimEvent::PlanetSelected(planet));
        }
    }

    /// With nothing selected, select `planet`. Otherwise send a fleet from
    /// the selection to `planet`; a refused order emits `DispatchRejected`.
    pub fn click_planet(&mut self, planet: PlanetId) {
        let Some(from) = self.selected else {
            self.select(Some(planet));
            return;
        };
        if let Err(err) = self.dispatch_fleet(from, planet) {
            log::debug!("transfer {} -> {} refused: {}", from, planet, err);
            self.events.push(SimEvent::DispatchRejected { from, to: planet });
        }
    }

    // -- Tick --

    /// Apply commands gathered since the last frame.
    pub fn handle_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            match command {
                Command::PlanetClicked(id) => self.click_planet(id),
                Command::ClearSelection => self.select(None),
                Command::Zoom { amount } => self.zoom.zoom(amount),
                Command::SpawnShips { planet, count } => {
                    let count = count.unwrap_or(self.config.spawn_batch);
                    if let Some(p) = self.planet_mut(planet) {
                        p.request_spawns(count);
                    }
                }
                Command::Restart => self.restart(),
            }
        }
    }

    /// Advance one tick: zoom, then ships, then planets.
    /// Ships move first so planets see this tick's fleet state.
    /// `time` is in milliseconds, `delta` in seconds.
    pub fn update(&mut self, time: f64, delta: f32) {
        self.zoom.handle_zoom();

        for ship in self.ships.iter_mut() {
            if let Motion::Arrived(planet) = ship.update(time, delta, &self.planets) {
                log::debug!("{} arrived at {}", ship.id, planet);
                self.events.push(SimEvent::ShipArrived { ship: ship.id, planet });
            }
        }

        for idx in 0..self.planets.len() {
            let spawns = self.planets[idx].update(time, delta);
            if spawns > 0 {
                let id = self.planets[idx].id;
                self.debug_spawn(id, spawns, time);
            }
        }
    }

    fn debug_spawn(&mut self, planet: PlanetId, count: usize, time: f64) {
        let mut spawned = 0;
        for _ in 0..count {
            if self.spawn_ship_at(planet, time).is_ok() {
                spawned += 1;
            }
        }
        let discarded = count - spawned;
        if discarded > 0 {
            log::warn!("{}: {} spawned ships found no orbit", planet, discarded);
        }
        self.events.push(SimEvent::ShipsSpawned { planet, spawned, discarded });
    }

    /// Check the allocator invariants: every planet's count matches its
    /// occupied slots and fits its capacity, and slot owners agree with the
    /// ships' own records.
    pub fn check_invariants(&self) -> Result<(), String> {
        for planet in &self.planets {
            let occupied = planet.occupied().count();
            if occupied != planet.ship_count() {
                return Err(format!(
                    "{}: {} occupied slots but ship_count {}",
                    planet.name,
                    occupied,
                    planet.ship_count()
                ));
            }
            if planet.ship_count() > planet.capacity() {
                return Err(format!("{}: over capacity", planet.name));
            }
            for (coord, ship_id) in planet.occupied() {
                let record = self.ship(ship_id).and_then(|s| s.orbit());
                if record.map(|o| (o.planet, o.slot)) != Some((planet.id, coord)) {
                    return Err(format!("{}: {} at {:?} disagrees with its ship", planet.name, ship_id, coord));
                }
            }
        }
        for ship in &self.ships {
            if let Some(orbit) = ship.orbit() {
                let held = self.planet(orbit.planet).and_then(|p| p.occupant(orbit.slot));
                if held != Some(ship.id) {
                    return Err(format!("{} claims {:?} it does not hold", ship.id, orbit.slot));
                }
            }
        }
        Ok(())
    }
}
