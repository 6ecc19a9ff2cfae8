//! Real-time game loop
//!
//! Per frame: poll input, tick the simulation with the last measured frame
//! delta, play cues for the events it raised, render, then pace.

use crate::audio::{AudioBackend, AudioManager, SoundCue};
use crate::consts::INITIAL_FRAME_DT;
use crate::error::SimError;
use crate::platform::{FrameClock, InputSource};
use crate::renderer::{Renderer, render};
use crate::sim::{GameState, tick};

pub struct GameLoop<R: Renderer, A: AudioBackend, I: InputSource> {
    state: GameState,
    renderer: R,
    audio: AudioManager<A>,
    input: I,
    clock: FrameClock,
    frame_dt: f32,
    started: bool,
}

impl<R: Renderer, A: AudioBackend, I: InputSource> GameLoop<R, A, I> {
    pub fn new(
        state: GameState,
        renderer: R,
        audio: AudioManager<A>,
        input: I,
        clock: FrameClock,
    ) -> Self {
        Self {
            state,
            renderer,
            audio,
            input,
            clock,
            frame_dt: INITIAL_FRAME_DT,
            started: false,
        }
    }

    /// Run until the input source requests quit
    pub fn run(&mut self) -> Result<(), SimError> {
        log::info!("Game loop started (seed {})", self.state.seed);
        while self.run_frame()? {}
        let (left, right) = self.state.ctx.score.render_state();
        log::info!(
            "Game loop stopped after {} frames, final score {} - {}",
            self.state.frame_count,
            left,
            right
        );
        Ok(())
    }

    /// One frame. Returns `false` once quit was requested.
    pub fn run_frame(&mut self) -> Result<bool, SimError> {
        if !self.started {
            self.started = true;
            let theme = self.state.pick_theme();
            self.audio.play(SoundCue::Theme(theme), true);
        }

        let input = self.input.poll();
        if input.quit_requested {
            return Ok(false);
        }

        tick(&mut self.state, &input, self.frame_dt)?;
        let events = self.state.drain_events();
        self.audio.play_events(&events);
        render(&self.state, &mut self.renderer)?;

        self.frame_dt = self.clock.end_frame();
        Ok(true)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::platform::IdleInput;
    use crate::renderer::NullRenderer;

    #[test]
    fn test_quits_on_request() {
        let mut game = GameLoop::new(
            GameState::new(4).unwrap(),
            NullRenderer,
            AudioManager::new(NullAudio),
            IdleInput::new(5),
            FrameClock::unpaced(),
        );
        game.run().unwrap();
        assert_eq!(game.state().frame_count, 5);
    }
}
