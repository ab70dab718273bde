use std::f32::consts::PI;

use glam::Vec2;

use crate::api::types::{PlanetId, ShipId};
use crate::components::orbit::{OrbitPath, SlotCoord};
use crate::components::planet::Planet;
use crate::core::math::{clamp, heading_between, lerp_vec2, map_range};

/// Transit speed in world units per second.
pub const DEFAULT_TRANSIT_SPEED: f32 = 100.0;
/// Closer than this to the reserved slot, a transiting ship snaps onto it.
pub const ARRIVAL_EPSILON: f32 = 3.0;
/// Within `HOMING_RADIUS_FACTOR * orbital_radius` of the target, ships aim
/// at their slot instead of the planet center.
pub const HOMING_RADIUS_FACTOR: f32 = 3.0;
/// Idle ships spin in place at 180°/s.
const IDLE_SPIN_RATE: f32 = PI;

/// The slot a ship holds and the orbit that slot follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub planet: PlanetId,
    pub slot: SlotCoord,
    pub path: OrbitPath,
}

/// An in-flight transfer toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    pub target: PlanetId,
    /// Distance left to the current aim point, refreshed every tick.
    /// Starts as the squared distance to the target.
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipState {
    /// Holds no slot. Only seen between leaving one orbit and entering another,
    /// or for ships spawned in open space.
    Idle,
    Orbiting,
    /// Flying toward the planet where it already reserved a slot.
    Transiting,
}

/// What a ship did during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Orbiting,
    Transiting,
    /// Reached its reserved slot this tick and is now orbiting.
    Arrived(PlanetId),
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub id: ShipId,
    pub pos: Vec2,
    /// Heading in radians.
    pub rotation: f32,
    pub velocity: Vec2,
    pub transit_speed: f32,
    orbit: Option<Orbit>,
    transit: Option<Transit>,
}

impl Ship {
    /// Create an idle ship at the origin.
    pub fn new(id: ShipId) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            transit_speed: DEFAULT_TRANSIT_SPEED,
            orbit: None,
            transit: None,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_transit_speed(mut self, speed: f32) -> Self {
        self.transit_speed = speed;
        self
    }

    pub fn state(&self) -> ShipState {
        if self.transit.is_some() {
            ShipState::Transiting
        } else if self.orbit.is_some() {
            ShipState::Orbiting
        } else {
            ShipState::Idle
        }
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        self.orbit.as_ref()
    }

    pub fn transit(&self) -> Option<&Transit> {
        self.transit.as_ref()
    }

    /// Planet whose slot this ship holds (the destination while in transit).
    pub fn orbiting(&self) -> Option<PlanetId> {
        self.orbit.map(|o| o.planet)
    }

    pub fn attacking(&self) -> Option<PlanetId> {
        self.transit.map(|t| t.target)
    }

    // -- Transitions, driven by the planet that owns the slot --

    pub fn on_orbit(&mut self, planet: PlanetId, slot: SlotCoord, path: OrbitPath) {
        self.velocity = Vec2::ZERO;
        self.orbit = Some(Orbit { planet, slot, path });
        log::debug!("{} entered orbit of {} at {:?}", self.id, planet, slot);
    }

    pub fn on_leave_orbit(&mut self, planet: PlanetId) -> Option<Orbit> {
        log::debug!("{} left orbit of {}", self.id, planet);
        self.orbit.take()
    }

    /// Start flying toward `target`, whose slot was already reserved.
    pub fn begin_transit(&mut self, target: PlanetId, target_pos: Vec2) {
        self.transit = Some(Transit {
            target,
            remaining: self.pos.distance_squared(target_pos),
        });
    }

    /// Stop flying; the ship keeps whatever slot it holds.
    pub fn cancel_transit(&mut self) -> Option<Transit> {
        self.transit.take()
    }

    // -- Per-tick motion --

    /// Move the ship for one tick. `time` is in milliseconds, `delta` in seconds.
    pub fn update(&mut self, time: f64, delta: f32, planets: &[Planet]) -> Motion {
        if self.transit.is_some() {
            return self.handle_transit(time, delta, planets);
        }
        if self.handle_orbit(time, planets) {
            return Motion::Orbiting;
        }
        self.rotation += IDLE_SPIN_RATE * delta;
        Motion::Idle
    }

    /// Place the ship on its orbit at `time`. Returns false when not orbiting.
    pub fn handle_orbit(&mut self, time: f64, planets: &[Planet]) -> bool {
        let Some(orbit) = self.orbit else {
            return false;
        };
        let Some(planet) = find_planet(planets, orbit.planet) else {
            return false;
        };
        let (pos, heading) = orbit.path.placement(planet.pos(), time);
        self.pos = pos;
        self.rotation = heading;
        true
    }

    fn handle_transit(&mut self, time: f64, delta: f32, planets: &[Planet]) -> Motion {
        let Some(mut transit) = self.transit else {
            return Motion::Idle;
        };
        let Some(target) = find_planet(planets, transit.target) else {
            log::warn!("{} lost its transit target {}", self.id, transit.target);
            self.transit = None;
            return Motion::Idle;
        };

        let center = target.pos();
        let mut remaining = self.pos.distance(center);
        let aim = if remaining >= target.orbital_radius() * HOMING_RADIUS_FACTOR {
            center
        } else {
            let Some(orbit) = self.orbit else {
                log::warn!("{} reached {} without a reserved slot", self.id, target.name);
                self.transit = None;
                return Motion::Idle;
            };
            let (slot_pos, slot_heading) = orbit.path.placement(center, time);
            remaining = self.pos.distance(slot_pos);
            // around small planets the slot outruns the ship, so arrival also
            // counts anything this tick's step plus the slot's own travel covers
            let reach = (self.transit_speed + orbit.path.linear_speed()) * delta;
            if remaining < ARRIVAL_EPSILON || remaining <= reach {
                self.pos = slot_pos;
                self.rotation = slot_heading;
                self.transit = None;
                return Motion::Arrived(transit.target);
            }
            slot_pos
        };

        let fraction = clamp(
            map_range(self.transit_speed * delta, (0.0, remaining), (0.0, 1.0)),
            0.0,
            1.0,
        );
        self.pos = lerp_vec2(self.pos, aim, fraction);
        if self.pos != aim {
            self.rotation = heading_between(self.pos, aim);
        }
        transit.remaining = remaining;
        self.transit = Some(transit);
        Motion::Transiting
    }
}

fn find_planet(planets: &[Planet], id: PlanetId) -> Option<&Planet> {
    planets.iter().find(|p| p.id == id)
}
