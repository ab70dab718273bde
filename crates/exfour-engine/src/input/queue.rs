use crate::api::types::PlanetId;

/// Orders the presentation layer can give the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Primary click on a planet: select it, or send a fleet from the
    /// selected planet to it.
    PlanetClicked(PlanetId),
    /// Click on empty space.
    ClearSelection,
    /// Mouse wheel; `amount` is the wheel delta already scaled (deltaY / 1000).
    Zoom { amount: f32 },
    /// Debug spawn of `count` ships into the planet's orbit (None = config batch size).
    SpawnShips { planet: PlanetId, count: Option<usize> },
    /// Rebuild the scene from its scenario.
    Restart,
}

/// A queue of pending commands.
/// The input layer pushes; the driver drains once per frame.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = CommandQueue::new();
        q.push(Command::PlanetClicked(PlanetId(1)));
        q.push(Command::Zoom { amount: 0.1 });
        assert_eq!(q.len(), 2);
        let commands = q.drain();
        assert_eq!(commands[0], Command::PlanetClicked(PlanetId(1)));
        assert!(q.is_empty());
    }
}
