//! Per-frame simulation tick
//!
//! Order within a frame:
//! 1. Apply input edges (intent flags, jumps)
//! 2. One fixed physics step and collision responses
//! 3. Ball air drag
//! 4. Character animation and horizontal velocity from intents

use serde::{Deserialize, Serialize};

use super::character::Direction;
use super::state::{GameState, Side};
use crate::consts::*;
use crate::error::SimError;

/// Input snapshot for one frame, indexed by `Side::index`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump key went down this frame
    pub jump_pressed: [bool; 2],
    /// Movement keys currently held
    pub move_left_held: [bool; 2],
    pub move_right_held: [bool; 2],
    /// Window close / quit key
    pub quit_requested: bool,
}

impl TickInput {
    /// Hold a movement key for `side`
    pub fn hold(mut self, side: Side, direction: Direction) -> Self {
        match direction {
            Direction::Left => self.move_left_held[side.index()] = true,
            Direction::Right => self.move_right_held[side.index()] = true,
        }
        self
    }

    pub fn jump(mut self, side: Side) -> Self {
        self.jump_pressed[side.index()] = true;
        self
    }
}

/// Clamp a measured frame delta into the range the movement code expects
pub fn clamp_frame_dt(frame_dt: f32) -> f32 {
    if frame_dt.is_nan() {
        return MIN_FRAME_DT;
    }
    frame_dt.clamp(MIN_FRAME_DT, MAX_FRAME_DT)
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, frame_dt: f32) -> Result<(), SimError> {
    let frame_dt = clamp_frame_dt(frame_dt);
    state.frame_count += 1;

    apply_input(state, input)?;
    state.step_physics()?;

    let frame = state.frame_count;
    let ctx = &mut state.ctx;
    ctx.ball.update(&mut ctx.world)?;
    for bird in &mut ctx.characters {
        bird.advance_animation(frame);
        bird.update_velocity(&mut ctx.world, frame_dt)?;
    }
    Ok(())
}

/// Held keys only change intent on press or release, so a response that
/// clears an intent sticks until the key is pressed again
fn apply_input(state: &mut GameState, input: &TickInput) -> Result<(), SimError> {
    let previous = std::mem::replace(&mut state.last_input, input.clone());
    let ctx = &mut state.ctx;

    for side in Side::ALL {
        let i = side.index();
        let bird = &mut ctx.characters[i];
        if input.move_left_held[i] != previous.move_left_held[i] {
            bird.set_intent(Direction::Left, input.move_left_held[i]);
        }
        if input.move_right_held[i] != previous.move_right_held[i] {
            bird.set_intent(Direction::Right, input.move_right_held[i]);
        }
        if input.jump_pressed[i] {
            bird.jump(&mut ctx.world)?;
        }
    }
    Ok(())
}
