use crate::world::{BlockType, World};
use glam::IVec3;

/// Emitted once per completed break, consumed fire-and-forget by audio and
/// particle collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEvent {
    pub position: IVec3,
    pub block: BlockType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BreakState {
    Idle,
    Targeting { position: IVec3, progress: f32 },
}

/// Accumulates one unit of progress per tick against the targeted block's
/// break threshold. Any interruption (input released, target lost, target
/// moved) discards the progress.
#[derive(Debug)]
pub struct BreakingController {
    state: BreakState,
}

impl Default for BreakingController {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakingController {
    pub fn new() -> Self {
        Self {
            state: BreakState::Idle,
        }
    }

    /// Advances the state machine for one tick. `target` is the current
    /// raycast hit, if any. Returns the break event on the tick the
    /// threshold is reached; the block has already been cleared by then.
    pub fn update(
        &mut self,
        world: &mut World,
        breaking: bool,
        target: Option<IVec3>,
    ) -> Option<BreakEvent> {
        if !breaking {
            self.state = BreakState::Idle;
            return None;
        }
        let Some(position) = target else {
            self.state = BreakState::Idle;
            return None;
        };

        let progress = match self.state {
            BreakState::Targeting {
                position: current,
                progress,
            } if current == position => progress + 1.0,
            _ => 1.0,
        };

        let block = world.block_at(position);
        if progress >= block.break_ticks() {
            world.set_block(position.x, position.y, position.z, BlockType::Empty);
            self.state = BreakState::Idle;
            return Some(BreakEvent { position, block });
        }

        self.state = BreakState::Targeting { position, progress };
        None
    }

    /// Current target and its normalized progress, for the overlay-drawing
    /// collaborator.
    pub fn progress_fraction(&self, world: &World) -> Option<(IVec3, f32)> {
        match self.state {
            BreakState::Targeting { position, progress } => {
                let ticks = world.block_at(position).break_ticks();
                Some((position, (progress / ticks).min(1.0)))
            }
            BreakState::Idle => None,
        }
    }
}
