//! Game state and the simulation context handed to collision responses
//!
//! Everything a collision response may touch lives in `SimulationContext`.
//! Entities refer to their bodies through handles into the world.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::body::BodyHandle;
use super::character::{Character, Direction};
use super::court::{Boundary, Divider};
use super::rules::CollisionRules;
use super::score::ScoreTracker;
use super::tick::TickInput;
use super::world::{PhysicsConfig, PhysicsWorld};
use crate::consts::THEME_COUNT;
use crate::error::{ConfigError, SimError};

/// Half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Direction that walks a bird on this side into the divider
    pub fn toward_divider(self) -> Direction {
        match self {
            Side::Left => Direction::Right,
            Side::Right => Direction::Left,
        }
    }

    /// Direction that walks a bird on this side into its outer wall
    pub fn outward(self) -> Direction {
        match self {
            Side::Left => Direction::Left,
            Side::Right => Direction::Right,
        }
    }
}

/// Gameplay events raised by collision responses, consumed by the host
/// (audio cues, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bird hit the ball; `variant` picks one of the hit sounds
    Hit { side: Side, variant: u8 },
    /// The ball landed on the opponent's floor
    Goal { scorer: Side },
}

/// Mutable simulation state passed explicitly to every collision response
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub world: PhysicsWorld,
    pub ball: Ball,
    pub characters: [Character; 2],
    pub divider: Divider,
    pub boundary: Boundary,
    pub score: ScoreTracker,
    /// Seeded RNG for cosmetic choices (hit sound, theme)
    pub rng: Pcg32,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl SimulationContext {
    /// Build the court: floors, walls, ball, both birds, divider
    pub fn new(seed: u64, config: PhysicsConfig) -> Result<Self, ConfigError> {
        let mut world = PhysicsWorld::new(config)?;
        let boundary = Boundary::spawn(&mut world)?;
        let ball = Ball::spawn(&mut world)?;
        let characters = [
            Character::spawn(&mut world, Side::Left)?,
            Character::spawn(&mut world, Side::Right)?,
        ];
        let divider = Divider::spawn(&mut world)?;

        Ok(Self {
            world,
            ball,
            characters,
            divider,
            boundary,
            score: ScoreTracker::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    pub fn character(&self, side: Side) -> &Character {
        &self.characters[side.index()]
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        &mut self.characters[side.index()]
    }
}

/// Kinematic state of one body, for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
}

/// Serializable view of the full simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame_count: u64,
    pub score: (u32, u32),
    pub bodies: Vec<BodyState>,
    pub grounded: [bool; 2],
    pub moving_left: [bool; 2],
    pub moving_right: [bool; 2],
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    /// Simulation frames run so far
    pub frame_count: u64,
    pub ctx: SimulationContext,
    rules: CollisionRules,
    /// Input of the previous frame, for press/release edges
    pub(crate) last_input: TickInput,
}

impl GameState {
    /// Create a new game with the standard court and rules
    pub fn new(seed: u64) -> Result<Self, ConfigError> {
        Self::with_config(seed, PhysicsConfig::default())
    }

    pub fn with_config(seed: u64, config: PhysicsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            seed,
            frame_count: 0,
            ctx: SimulationContext::new(seed, config)?,
            rules: CollisionRules::standard(),
            last_input: TickInput::default(),
        })
    }

    pub fn rules(&self) -> &CollisionRules {
        &self.rules
    }

    /// One fixed physics step followed by collision response dispatch
    pub fn step_physics(&mut self) -> Result<(), SimError> {
        let dt = self.ctx.world.config().fixed_timestep;
        let contacts = self.ctx.world.step(dt)?;
        self.rules.dispatch(&mut self.ctx, &contacts)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    /// Pick a background theme with the game RNG
    pub fn pick_theme(&mut self) -> u8 {
        use rand::Rng;
        self.ctx.rng.random_range(0..THEME_COUNT)
    }

    pub fn body_position(&self, body: BodyHandle) -> Result<Vec2, SimError> {
        Ok(self.ctx.world.body(body)?.position)
    }

    pub fn snapshot(&self) -> Snapshot {
        let bodies = self
            .ctx
            .world
            .bodies()
            .iter()
            .map(|b| BodyState {
                position: b.position,
                velocity: b.velocity,
                angle: b.angle,
                angular_velocity: b.angular_velocity,
            })
            .collect();
        let [left, right] = &self.ctx.characters;
        Snapshot {
            frame_count: self.frame_count,
            score: self.ctx.score.render_state(),
            bodies,
            grounded: [left.grounded, right.grounded],
            moving_left: [left.moving_left, right.moving_left],
            moving_right: [left.moving_right, right.moving_right],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::vec2;

    #[test]
    fn test_new_court_layout() {
        let state = GameState::new(7).unwrap();
        let ctx = &state.ctx;
        assert_eq!(ctx.world.bodies().len(), 8);
        assert_eq!(
            state.body_position(ctx.ball.body).unwrap(),
            Vec2::new(COURT_WIDTH / 4.0, BALL_SPAWN_Y)
        );
        assert_eq!(
            state.body_position(ctx.character(Side::Right).body).unwrap(),
            vec2(RIGHT_CHARACTER_ORIGIN)
        );
        assert!(ctx.characters.iter().all(|c| c.grounded));
        assert_eq!(ctx.score.render_state(), (0, 0));
    }

    #[test]
    fn test_invalid_physics_config_fails_fast() {
        let config = PhysicsConfig {
            fixed_timestep: 0.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(
            GameState::with_config(1, config).err(),
            Some(ConfigError::InvalidPhysics("fixed_timestep"))
        );
    }

    #[test]
    fn test_theme_choice_is_seeded() {
        let mut a = GameState::new(42).unwrap();
        let mut b = GameState::new(42).unwrap();
        let picks_a: Vec<u8> = (0..8).map(|_| a.pick_theme()).collect();
        let picks_b: Vec<u8> = (0..8).map(|_| b.pick_theme()).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&t| t < THEME_COUNT));
    }

    #[test]
    fn test_sides() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Left.toward_divider(), Direction::Right);
        assert_eq!(Side::Right.toward_divider(), Direction::Left);
        assert_eq!(Side::Right.outward(), Direction::Right);
    }
}
