//! Extract draw commands from the game state
//!
//! Sprite anchors are top-left corners in screen space, offset from the body
//! origins to match the artwork.

use glam::Vec2;

use crate::consts::COURT_WIDTH;
use crate::error::SimError;
use crate::sim::{GameState, Pose, Side};

/// Ball sprite is 100x100, centered on the body
const BALL_SPRITE_OFFSET: Vec2 = Vec2::new(-50.0, -50.0);
const LEFT_CHARACTER_SPRITE_OFFSET: Vec2 = Vec2::new(-33.0, 520.0);
const RIGHT_CHARACTER_SPRITE_OFFSET: Vec2 = Vec2::new(-66.0, 520.0);
const DIVIDER_SPRITE_ANCHOR: Vec2 = Vec2::new(395.0, 210.0);
const SCORE_Y: f32 = 120.0;
const SCORE_X_OFFSET: f32 = -20.0;

/// Drawable artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Ball,
    Character { side: Side, pose: Pose },
    Divider,
}

/// One draw call, in painter's order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Sprite { sprite: Sprite, at: Vec2 },
    Score { value: u32, at: Vec2 },
}

fn character_offset(side: Side) -> Vec2 {
    match side {
        Side::Left => LEFT_CHARACTER_SPRITE_OFFSET,
        Side::Right => RIGHT_CHARACTER_SPRITE_OFFSET,
    }
}

fn score_anchor(side: Side) -> Vec2 {
    let x = match side {
        Side::Left => COURT_WIDTH / 4.0,
        Side::Right => COURT_WIDTH * 3.0 / 4.0,
    };
    Vec2::new(x + SCORE_X_OFFSET, SCORE_Y)
}

/// Background, scores, ball, left bird, right bird, divider
pub fn extract(state: &GameState) -> Result<Vec<DrawCommand>, SimError> {
    let ctx = &state.ctx;
    let mut commands = Vec::with_capacity(7);

    commands.push(DrawCommand::Sprite {
        sprite: Sprite::Background,
        at: Vec2::ZERO,
    });
    for side in Side::ALL {
        commands.push(DrawCommand::Score {
            value: ctx.score.get(side),
            at: score_anchor(side),
        });
    }

    commands.push(DrawCommand::Sprite {
        sprite: Sprite::Ball,
        at: state.body_position(ctx.ball.body)? + BALL_SPRITE_OFFSET,
    });
    for bird in &ctx.characters {
        commands.push(DrawCommand::Sprite {
            sprite: Sprite::Character {
                side: bird.side,
                pose: bird.pose(),
            },
            at: state.body_position(bird.body)? + character_offset(bird.side),
        });
    }

    commands.push(DrawCommand::Sprite {
        sprite: Sprite::Divider,
        at: DIVIDER_SPRITE_ANCHOR,
    });
    Ok(commands)
}
