//! Rendering module
//!
//! The game extracts a list of draw commands each frame; drawing them is up
//! to the host through the `Renderer` trait.

pub mod scene;

pub use scene::{DrawCommand, Sprite, extract};

use glam::Vec2;

use crate::error::SimError;
use crate::sim::GameState;

/// Host drawing interface
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, at: Vec2);
    fn draw_score(&mut self, value: u32, at: Vec2);
    /// Called once all draw calls of a frame are issued
    fn present(&mut self) {}
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_sprite(&mut self, _sprite: Sprite, _at: Vec2) {}
    fn draw_score(&mut self, _value: u32, _at: Vec2) {}
}

/// Extract the scene and hand it to the renderer
pub fn render<R: Renderer>(state: &GameState, renderer: &mut R) -> Result<(), SimError> {
    for command in extract(state)? {
        match command {
            DrawCommand::Sprite { sprite, at } => renderer.draw_sprite(sprite, at),
            DrawCommand::Score { value, at } => renderer.draw_score(value, at),
        }
    }
    renderer.present();
    log::trace!("frame {} rendered", state.frame_count);
    Ok(())
}
