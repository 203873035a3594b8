//! Caller-supplied automation scripts.

use crate::algorithm::strategy::TrajectoryPolicy;
use crate::error::Result;
use crate::input::InputInjector;
use crate::motion::cursor::HumanCursor;

/// A script driven through a [`HumanCursor`]. The cursor never inspects it.
pub trait Instruction {
    fn perform<P: TrajectoryPolicy, I: InputInjector>(
        &mut self,
        cursor: &mut HumanCursor<P, I>,
    ) -> Result<()>;
}

/// Desktop smoke script: idle around, recenter, optionally click, idle again.
#[derive(Debug, Clone)]
pub struct WanderAndClick {
    pub rounds: usize,
    pub click: bool,
}

impl Default for WanderAndClick {
    fn default() -> Self {
        Self {
            rounds: 3,
            click: false,
        }
    }
}

impl Instruction for WanderAndClick {
    fn perform<P: TrajectoryPolicy, I: InputInjector>(
        &mut self,
        cursor: &mut HumanCursor<P, I>,
    ) -> Result<()> {
        log::info!("wander_and_click: rounds={} click={}", self.rounds, self.click);
        for _ in 0..self.rounds {
            cursor.random_wandering()?;
        }

        let (offset_x, offset_y) = cursor.policy_mut().screen_center_offsets();
        cursor.random_sleep();
        cursor.move_to_screen_center(offset_x, offset_y)?;
        if self.click {
            cursor.click()?;
        }

        cursor.random_wandering()
    }
}
