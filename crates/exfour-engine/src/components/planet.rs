use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::types::{PlanetId, ShipId};
use crate::components::orbit::{OrbitPath, SlotCoord};

/// Distance between consecutive orbital shells.
pub const ORBITAL_SHELL_INCREMENT: f32 = 7.0;
/// Orbital circumference one ship occupies.
pub const ORBITAL_SPACE_PER_SHIP: f32 = 5.0;
/// Shells beyond `ORBITAL_ENVELOPE * orbital_radius` hold no ships.
pub const ORBITAL_ENVELOPE: f32 = 2.5;
/// Gap between the planet body and its innermost shell.
pub const ORBIT_MARGIN: f32 = 2.0;
/// Largest accepted body radius. Shell limits are precomputed per shell,
/// about `1.5 * radius / 7` of them.
pub const MAX_BODY_RADIUS: f32 = 4096.0;

/// Whether a planet of this body radius can be built.
pub fn valid_body_radius(radius: f32) -> bool {
    radius.is_finite() && radius > 0.0 && radius <= MAX_BODY_RADIUS
}

/// A planet and its orbital slot allocator.
///
/// Shells are allocated innermost-first, slots lowest-index-first. Freed
/// slots stay empty until the next request fills them; nothing is compacted.
#[derive(Debug, Clone)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pos: Vec2,
    orbital_radius: f32,
    /// Max slots per shell inside the envelope; computed once.
    shell_limits: Vec<usize>,
    capacity: usize,
    /// Shells created so far, each sized to its limit.
    shells: Vec<Vec<Option<ShipId>>>,
    ship_count: usize,
    /// Debug spawns requested since the last update.
    pending_spawns: usize,
}

impl Planet {
    /// Create a planet whose innermost shell sits at `orbital_radius`.
    /// A radius whose body would fail `valid_body_radius` gets no slots.
    pub fn new(id: PlanetId, name: impl Into<String>, pos: Vec2, orbital_radius: f32) -> Self {
        let mut shell_limits = Vec::new();
        if valid_body_radius(orbital_radius - ORBIT_MARGIN) {
            loop {
                let limit = shell_limit(orbital_radius, shell_limits.len());
                if limit == 0 {
                    break;
                }
                shell_limits.push(limit);
            }
        } else {
            log::warn!("{}: orbital radius {} out of range, no slots", id, orbital_radius);
        }
        let capacity = shell_limits.iter().sum();

        Self {
            id,
            name: name.into(),
            pos,
            orbital_radius,
            shell_limits,
            capacity,
            shells: Vec::new(),
            ship_count: 0,
            pending_spawns: 0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Radius of the innermost shell.
    pub fn orbital_radius(&self) -> f32 {
        self.orbital_radius
    }

    pub fn shell_radius(&self, shell: usize) -> f32 {
        self.orbital_radius + shell as f32 * ORBITAL_SHELL_INCREMENT
    }

    /// Slot count of `shell`; 0 outside the orbital envelope.
    pub fn max_ships(&self, shell: usize) -> usize {
        self.shell_limits.get(shell).copied().unwrap_or(0)
    }

    /// Total slots across every shell inside the envelope.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ship_count(&self) -> usize {
        self.ship_count
    }

    pub fn free_capacity(&self) -> usize {
        self.capacity - self.ship_count
    }

    /// Number of shells created so far.
    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    /// Occupant of a slot, if any.
    pub fn occupant(&self, coord: SlotCoord) -> Option<ShipId> {
        self.shells.get(coord.shell)?.get(coord.slot).copied().flatten()
    }

    /// Every occupied slot, innermost shell first.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotCoord, ShipId)> + '_ {
        self.shells.iter().enumerate().flat_map(|(shell, slots)| {
            slots
                .iter()
                .enumerate()
                .filter_map(move |(slot, ship)| ship.map(|id| (SlotCoord::new(shell, slot), id)))
        })
    }

    /// Orbit followed by whoever sits in `coord`.
    pub fn orbit_path(&self, coord: SlotCoord) -> OrbitPath {
        OrbitPath::for_slot(self.shell_radius(coord.shell), coord.slot, self.max_ships(coord.shell))
    }

    /// Put `ship` into the innermost free slot.
    /// Returns None when every slot in the envelope is taken.
    pub fn claim_slot(&mut self, ship: ShipId) -> Option<(SlotCoord, OrbitPath)> {
        let coord = self.first_free_slot()?;
        self.shells[coord.shell][coord.slot] = Some(ship);
        self.ship_count += 1;
        Some((coord, self.orbit_path(coord)))
    }

    /// Empty a slot. Returns the ship that was there, or None if it was
    /// already empty or out of range.
    pub fn release_slot(&mut self, coord: SlotCoord) -> Option<ShipId> {
        let ship = self.shells.get_mut(coord.shell)?.get_mut(coord.slot)?.take()?;
        self.ship_count -= 1;
        Some(ship)
    }

    /// Up to `n` occupied slots, outermost shell and highest slot first.
    pub fn select_outermost(&self, n: usize) -> Vec<(SlotCoord, ShipId)> {
        let mut picked = Vec::with_capacity(n.min(self.ship_count));
        'shells: for (shell, slots) in self.shells.iter().enumerate().rev() {
            for (slot, ship) in slots.iter().enumerate().rev() {
                if picked.len() >= n {
                    break 'shells;
                }
                if let Some(id) = ship {
                    picked.push((SlotCoord::new(shell, slot), *id));
                }
            }
        }
        picked
    }

    /// Queue `count` debug spawns for the next update.
    pub fn request_spawns(&mut self, count: usize) {
        self.pending_spawns += count;
    }

    /// Per-tick bookkeeping. Returns the debug spawns due this tick.
    pub fn update(&mut self, _time: f64, _delta: f32) -> usize {
        std::mem::take(&mut self.pending_spawns)
    }

    fn first_free_slot(&mut self) -> Option<SlotCoord> {
        for shell in 0..self.shell_limits.len() {
            if shell == self.shells.len() {
                log::debug!("{}: opened orbital shell {}", self.name, shell);
                self.shells.push(vec![None; self.shell_limits[shell]]);
            }
            if let Some(slot) = self.shells[shell].iter().position(Option::is_none) {
                return Some(SlotCoord::new(shell, slot));
            }
        }
        None
    }
}

/// `floor(circumference / space per ship)` for shells inside the envelope.
fn shell_limit(orbital_radius: f32, shell: usize) -> usize {
    let radius = orbital_radius + shell as f32 * ORBITAL_SHELL_INCREMENT;
    if radius > orbital_radius * ORBITAL_ENVELOPE {
        0
    } else {
        (radius * TAU / ORBITAL_SPACE_PER_SHIP).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atrex() -> Planet {
        // body radius 48, orbits start 2 units out
        Planet::new(PlanetId(1), "Atrex", Vec2::new(450.0, 250.0), 48.0 + ORBIT_MARGIN)
    }

    fn fill(planet: &mut Planet, n: u32) {
        for i in 0..n {
            planet.claim_slot(ShipId(i)).unwrap();
        }
    }

    #[test]
    fn innermost_shell_capacity() {
        let p = atrex();
        assert_eq!(p.max_ships(0), 62);
        assert_eq!(p.max_ships(1), ((57.0f32 * TAU) / 5.0).floor() as usize);
    }

    #[test]
    fn shells_beyond_envelope_are_empty() {
        let p = atrex();
        // 50 + 10 * 7 = 120 <= 125, 50 + 11 * 7 = 127 > 125
        assert!(p.max_ships(10) > 0);
        assert_eq!(p.max_ships(11), 0);
        assert_eq!(p.max_ships(500), 0);
    }

    #[test]
    fn capacity_sums_shells() {
        let p = atrex();
        let expected: usize = (0..11).map(|s| p.max_ships(s)).sum();
        assert_eq!(p.capacity(), expected);
    }

    #[test]
    fn claims_innermost_lowest_slot_first() {
        let mut p = atrex();
        let (first, _) = p.claim_slot(ShipId(1)).unwrap();
        let (second, _) = p.claim_slot(ShipId(2)).unwrap();
        assert_eq!(first, SlotCoord::new(0, 0));
        assert_eq!(second, SlotCoord::new(0, 1));
        assert_eq!(p.shell_count(), 1);
    }

    #[test]
    fn shells_open_lazily() {
        let mut p = atrex();
        fill(&mut p, 62);
        assert_eq!(p.shell_count(), 1);
        let (coord, path) = p.claim_slot(ShipId(100)).unwrap();
        assert_eq!(coord, SlotCoord::new(1, 0));
        assert_eq!(path.radius, 57.0);
        assert_eq!(p.shell_count(), 2);
    }

    #[test]
    fn released_holes_are_reused_without_compaction() {
        let mut p = atrex();
        fill(&mut p, 5);
        assert_eq!(p.release_slot(SlotCoord::new(0, 2)), Some(ShipId(2)));
        assert_eq!(p.occupant(SlotCoord::new(0, 3)), Some(ShipId(3)));
        assert_eq!(p.ship_count(), 4);
        let (coord, _) = p.claim_slot(ShipId(9)).unwrap();
        assert_eq!(coord, SlotCoord::new(0, 2));
    }

    #[test]
    fn release_empty_or_missing_slot_is_noop() {
        let mut p = atrex();
        fill(&mut p, 1);
        assert_eq!(p.release_slot(SlotCoord::new(0, 5)), None);
        assert_eq!(p.release_slot(SlotCoord::new(7, 0)), None);
        assert_eq!(p.ship_count(), 1);
    }

    #[test]
    fn fill_to_capacity_then_reject() {
        let mut p = atrex();
        let cap = p.capacity() as u32;
        fill(&mut p, cap);
        assert_eq!(p.ship_count(), p.capacity());
        assert_eq!(p.free_capacity(), 0);
        assert!(p.claim_slot(ShipId(cap)).is_none());
        assert_eq!(p.ship_count(), p.capacity());
        assert_eq!(p.occupied().count(), p.capacity());
    }

    #[test]
    fn select_outermost_walks_backwards() {
        let mut p = atrex();
        fill(&mut p, 64); // shell 0 full, two ships in shell 1
        let picked = p.select_outermost(3);
        assert_eq!(
            picked,
            vec![
                (SlotCoord::new(1, 1), ShipId(63)),
                (SlotCoord::new(1, 0), ShipId(62)),
                (SlotCoord::new(0, 61), ShipId(61)),
            ]
        );
        // selection does not mutate
        assert_eq!(p.ship_count(), 64);
    }

    #[test]
    fn select_outermost_skips_holes() {
        let mut p = atrex();
        fill(&mut p, 4);
        p.release_slot(SlotCoord::new(0, 3));
        let picked = p.select_outermost(10);
        let ids: Vec<ShipId> = picked.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![ShipId(2), ShipId(1), ShipId(0)]);
    }

    #[test]
    fn slot_phase_follows_slot_index() {
        let mut p = atrex();
        fill(&mut p, 31);
        let path = p.orbit_path(SlotCoord::new(0, 31));
        assert!((path.phase - 31.0 / 62.0 * TAU).abs() < 1e-5);
    }

    #[test]
    fn update_drains_pending_spawns() {
        let mut p = atrex();
        p.request_spawns(25);
        p.request_spawns(5);
        assert_eq!(p.update(0.0, 0.016), 30);
        assert_eq!(p.update(16.0, 0.016), 0);
    }

    #[test]
    fn unbounded_radius_gets_no_slots() {
        for radius in [f32::INFINITY, f32::NAN, 1e9, -5.0] {
            let mut p = Planet::new(PlanetId(3), "Void", Vec2::ZERO, radius);
            assert_eq!(p.capacity(), 0, "radius {}", radius);
            assert!(p.claim_slot(ShipId(1)).is_none());
        }
        let largest = Planet::new(PlanetId(4), "Giant", Vec2::ZERO, MAX_BODY_RADIUS + ORBIT_MARGIN);
        assert!(largest.capacity() > 0);
    }

    #[test]
    fn tiny_orbit_has_no_capacity() {
        let mut p = Planet::new(PlanetId(2), "Pebble", Vec2::ZERO, 0.5);
        assert_eq!(p.capacity(), 0);
        assert!(p.claim_slot(ShipId(1)).is_none());
    }
}
