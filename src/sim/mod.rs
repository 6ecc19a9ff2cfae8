//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed physics timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body handle)
//! - No rendering, audio or platform dependencies
//!
//! Entities hold body handles into the `PhysicsWorld`. Collision responses
//! receive the whole `SimulationContext` explicitly.

pub mod ball;
pub mod body;
pub mod character;
pub mod collision;
pub mod court;
pub mod rules;
pub mod score;
pub mod state;
pub mod tick;
pub mod world;

pub use ball::Ball;
pub use body::{BodyHandle, BodyKind, Category, Material, RigidBody, Shape};
pub use character::{Character, Direction, Pose};
pub use collision::{CollisionResult, collide};
pub use court::{Boundary, Divider};
pub use rules::{CollisionRules, Phase, Response, RulesBuilder};
pub use score::ScoreTracker;
pub use state::{GameEvent, GameState, Side, SimulationContext, Snapshot};
pub use tick::{TickInput, clamp_frame_dt, tick};
pub use world::{ContactPair, PhysicsConfig, PhysicsWorld};
