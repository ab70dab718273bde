use exfour_engine::{Command, CommandQueue, FixedTimestep, Scene, SimEvent};

/// Wires a scene to the fixed-timestep loop.
///
/// The caller feeds wall-clock frame deltas to `tick`; commands pushed
/// between frames are applied right before the first fixed step of the
/// next frame that runs one.
pub struct SimRunner {
    scene: Scene,
    commands: CommandQueue,
    timestep: FixedTimestep,
    events: Vec<SimEvent>,
}

impl SimRunner {
    pub fn new(scene: Scene) -> Self {
        let timestep = FixedTimestep::new(scene.config().fixed_dt);
        Self {
            scene,
            commands: CommandQueue::new(),
            timestep,
            events: Vec::new(),
        }
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame: as many fixed steps as the accumulated time allows.
    pub fn tick(&mut self, frame_dt: f32) {
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            let commands = self.commands.drain();
            if commands.contains(&Command::Restart) {
                self.timestep.reset();
            }
            self.scene.handle_commands(commands);

            let (time, delta) = self.timestep.step();
            self.scene.update(time, delta);
            self.events.extend(self.scene.drain_events());
        }

        if cfg!(debug_assertions) {
            if let Err(violation) = self.scene.check_invariants() {
                log::error!("invariant violated at {:.0} ms: {}", self.timestep.elapsed_ms(), violation);
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Simulation time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.timestep.elapsed_ms()
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Events produced by the steps run so far, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
