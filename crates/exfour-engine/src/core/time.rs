/// Most fixed steps run for a single frame; excess frame time is dropped.
const MAX_STEPS_PER_FRAME: f32 = 10.0;

/// Fixed timestep accumulator.
/// Ensures simulation runs at a consistent rate regardless of frame time,
/// and keeps the simulation clock every `update(time, delta)` receives.
pub struct FixedTimestep {
    /// The fixed delta time per tick, in seconds.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Simulation time in milliseconds, advanced once per fixed step.
    elapsed_ms: f64,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            elapsed_ms: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Advance the clock by one fixed step.
    /// Returns `(time, delta)`: time in milliseconds, delta in seconds.
    pub fn step(&mut self) -> (f64, f32) {
        self.elapsed_ms += f64::from(self.dt) * 1000.0;
        (self.elapsed_ms, self.dt)
    }

    /// Simulation time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Rewind the clock, e.g. when the scene restarts.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.elapsed_ms = 0.0;
    }

    /// Interpolation alpha between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn step_advances_clock_in_millis() {
        let mut ts = FixedTimestep::new(0.02);
        let (t1, d1) = ts.step();
        let (t2, _) = ts.step();
        assert!((t1 - 20.0).abs() < 1e-3, "t1 was {}", t1);
        assert!((t2 - 40.0).abs() < 1e-3, "t2 was {}", t2);
        assert_eq!(d1, 0.02);
        ts.reset();
        assert_eq!(ts.elapsed_ms(), 0.0);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
