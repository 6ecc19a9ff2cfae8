//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (frame pacing and measured frame delta)
//! - Input polling

use std::time::{Duration, Instant};

use crate::consts::TARGET_FPS;
use crate::sim::{TickInput, clamp_frame_dt};

/// Source of per-frame input snapshots
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Presses nothing; requests quit after `frame_limit` polls
#[derive(Debug, Clone)]
pub struct IdleInput {
    frame_limit: u64,
    polled: u64,
}

impl IdleInput {
    pub fn new(frame_limit: u64) -> Self {
        Self {
            frame_limit,
            polled: 0,
        }
    }
}

impl InputSource for IdleInput {
    fn poll(&mut self) -> TickInput {
        self.polled += 1;
        TickInput {
            quit_requested: self.polled > self.frame_limit,
            ..TickInput::default()
        }
    }
}

/// Replays a fixed list of inputs, then quits
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: std::vec::IntoIter<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.frames.next().unwrap_or(TickInput {
            quit_requested: true,
            ..TickInput::default()
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Pacing {
    /// Sleep off the rest of each frame budget
    Paced(Duration),
    Unpaced,
    /// Report a constant delta without touching the wall clock
    Fixed(f32),
}

/// Caps the loop at the target frame rate and measures frame deltas
#[derive(Debug)]
pub struct FrameClock {
    pacing: Pacing,
    last_frame: Instant,
}

impl FrameClock {
    fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            last_frame: Instant::now(),
        }
    }

    /// Sleeps to hold `TARGET_FPS`
    pub fn paced() -> Self {
        Self::with_pacing(Pacing::Paced(Duration::from_secs_f64(
            1.0 / TARGET_FPS as f64,
        )))
    }

    /// Never sleeps
    pub fn unpaced() -> Self {
        Self::with_pacing(Pacing::Unpaced)
    }

    /// Constant frame delta, for replays and tests
    pub fn fixed(frame_dt: f32) -> Self {
        Self::with_pacing(Pacing::Fixed(frame_dt))
    }

    /// Finish a frame: sleep off the remaining budget, then return the
    /// clamped delta since the previous frame
    pub fn end_frame(&mut self) -> f32 {
        match self.pacing {
            Pacing::Fixed(frame_dt) => return clamp_frame_dt(frame_dt),
            Pacing::Paced(budget) => {
                let spent = self.last_frame.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
            Pacing::Unpaced => {}
        }
        let now = Instant::now();
        let frame_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        clamp_frame_dt(frame_dt)
    }
}
