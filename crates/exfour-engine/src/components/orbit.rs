use std::f64::consts::TAU;

use glam::Vec2;

/// Address of one orbital slot around a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotCoord {
    /// Shell index, 0 = innermost.
    pub shell: usize,
    /// Slot index within the shell.
    pub slot: usize,
}

impl SlotCoord {
    pub fn new(shell: usize, slot: usize) -> Self {
        Self { shell, slot }
    }
}

/// Circular orbit of one slot, as a value.
///
/// `angle(t) = phase - ((t / period) mod 2π)`, with `t` in milliseconds.
/// Wider shells get a larger period, so their ships move slower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    /// Distance from the planet center.
    pub radius: f32,
    /// Angle at time zero: `slot / shell_slots * 2π`.
    pub phase: f32,
    /// Time divisor: `(radius * 0.67)^2`.
    pub period: f32,
}

impl OrbitPath {
    pub fn for_slot(radius: f32, slot: usize, shell_slots: usize) -> Self {
        let phase = if shell_slots == 0 {
            0.0
        } else {
            (slot as f32 / shell_slots as f32) * std::f32::consts::TAU
        };
        Self {
            radius,
            phase,
            period: (radius * 0.67).powi(2),
        }
    }

    /// Angular position at `time` milliseconds.
    pub fn angle_at(&self, time: f64) -> f32 {
        let swept = (time / f64::from(self.period)).rem_euclid(TAU);
        self.phase - swept as f32
    }

    /// Speed of the slot along its circle, in world units per second.
    pub fn linear_speed(&self) -> f32 {
        if self.period > 0.0 {
            self.radius * 1000.0 / self.period
        } else {
            0.0
        }
    }

    /// Offset from the planet center at `time`. Angle 0 points to -Y.
    pub fn offset_at(&self, time: f64) -> Vec2 {
        let angle = self.angle_at(time);
        Vec2::new(self.radius * angle.sin(), -self.radius * angle.cos())
    }

    /// World position and heading of the slot at `time`.
    pub fn placement(&self, center: Vec2, time: f64) -> (Vec2, f32) {
        let angle = self.angle_at(time);
        let pos = center + Vec2::new(self.radius * angle.sin(), -self.radius * angle.cos());
        (pos, angle - std::f32::consts::PI)
    }
}
