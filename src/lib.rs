//! Bird Volley - a two-player volleyball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rigid-body world, collision rules, entities)
//! - `game`: Real-time loop tying the simulation to its collaborators
//! - `renderer`: Scene extraction and the host drawing interface
//! - `audio`: Sound cues and the host playback interface
//! - `platform`: Frame pacing and input sources
//! - `settings`: Startup settings (audio, seed)

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use game::GameLoop;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Court dimensions (screen space, y grows downward)
    pub const COURT_WIDTH: f32 = 840.0;
    pub const COURT_HEIGHT: f32 = 640.0;

    /// Fixed physics timestep (60 Hz)
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    /// Target frame rate of the real-time loop
    pub const TARGET_FPS: u32 = 60;
    /// Clamp range for the measured frame delta
    pub const MIN_FRAME_DT: f32 = 0.001;
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame delta used before the first frame has been measured
    pub const INITIAL_FRAME_DT: f32 = 0.1;

    /// Gravity (pixels/s², downward)
    pub const GRAVITY: f32 = 981.0;
    /// Allowed penetration before position correction kicks in
    pub const CONTACT_SLOP: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 44.0;
    pub const BALL_MASS: f32 = 10.0;
    pub const BALL_ELASTICITY: f32 = 2.0;
    pub const BALL_FRICTION: f32 = 0.4;
    /// Spawn height for both halves
    pub const BALL_SPAWN_Y: f32 = 70.0;
    /// Per-frame vertical velocity damping (air drag)
    pub const BALL_VERTICAL_DAMPING: f32 = 0.97;

    /// Character defaults
    pub const CHARACTER_MASS: f32 = 100.0;
    pub const CHARACTER_ELASTICITY: f32 = 0.4;
    pub const CHARACTER_FRICTION: f32 = 0.5;
    /// Horizontal speed factor, multiplied by frame delta
    pub const CHARACTER_SPEED: f32 = 20_000.0;
    /// Upward jump impulse (negative y is up)
    pub const JUMP_IMPULSE: f32 = 70_000.0;
    /// Simulation frames between run-animation frame flips
    pub const RUN_ANIMATION_CADENCE: u64 = 8;
    /// Number of run-animation frames
    pub const RUN_ANIMATION_FRAMES: u8 = 2;
    /// Body origins at startup
    pub const LEFT_CHARACTER_ORIGIN: (f32, f32) = (140.0, -76.0);
    pub const RIGHT_CHARACTER_ORIGIN: (f32, f32) = (590.0, -76.0);
    /// Trapezoidal footprint with a pointed top, relative to the body origin
    pub const CHARACTER_FOOTPRINT: [(f32, f32); 7] = [
        (0.0, 640.0),
        (100.0, 640.0),
        (100.0, 590.0),
        (60.0, 540.0),
        (50.0, 538.0),
        (40.0, 540.0),
        (0.0, 590.0),
    ];

    /// Static geometry material
    pub const WALL_ELASTICITY: f32 = 0.4;
    pub const WALL_FRICTION: f32 = 0.5;
    /// Floor line height above the bottom of the court
    pub const FLOOR_INSET: f32 = 75.0;
    pub const FLOOR_THICKNESS: f32 = 1.0;
    /// Divider (pole) box
    pub const DIVIDER_CENTER: (f32, f32) = (420.0, 425.0);
    pub const DIVIDER_SIZE: (f32, f32) = (26.0, 364.0);

    /// Number of hit sound variants
    pub const HIT_VARIANTS: u8 = 3;
    /// Number of background themes
    pub const THEME_COUNT: u8 = 3;
}

/// Screen-space point from a tuple constant
#[inline]
pub fn vec2(p: (f32, f32)) -> Vec2 {
    Vec2::new(p.0, p.1)
}

/// 2D cross product of two vectors (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar angular velocity with a vector (ω × r)
#[inline]
pub fn cross_scalar(w: f32, r: Vec2) -> Vec2 {
    Vec2::new(-w * r.y, w * r.x)
}
