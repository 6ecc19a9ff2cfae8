//! Player-controlled bird
//!
//! Horizontal motion is not physical: every frame the horizontal velocity is
//! overwritten from the intent flags. Vertical motion belongs to gravity,
//! contacts and the jump impulse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyHandle, Category, Material, RigidBody, Shape};
use super::state::Side;
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::error::{ConfigError, SimError};
use crate::vec2;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Animation pose, in precedence order Running > Airborne > Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Airborne,
    /// Run cycle frame index
    Running(u8),
}

/// A bird on one side of the court
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub side: Side,
    pub body: BodyHandle,
    pub moving_left: bool,
    pub moving_right: bool,
    pub grounded: bool,
    pub run_frame: u8,
}

impl Character {
    /// Create the bird's body at its starting origin and register it
    pub fn spawn(world: &mut PhysicsWorld, side: Side) -> Result<Self, ConfigError> {
        let footprint: Vec<Vec2> = CHARACTER_FOOTPRINT.iter().map(|&p| vec2(p)).collect();
        let origin = match side {
            Side::Left => vec2(LEFT_CHARACTER_ORIGIN),
            Side::Right => vec2(RIGHT_CHARACTER_ORIGIN),
        };
        let body = RigidBody::dynamic(
            origin,
            CHARACTER_MASS,
            Shape::polygon(&footprint)?,
            Material::new(CHARACTER_ELASTICITY, CHARACTER_FRICTION)?,
            Self::category(side),
        )?
        .with_locked_rotation();

        Ok(Self {
            side,
            body: world.add(body),
            moving_left: false,
            moving_right: false,
            grounded: true,
            run_frame: 0,
        })
    }

    /// Collision category for the bird on `side`
    pub fn category(side: Side) -> Category {
        match side {
            Side::Left => Category::LeftCharacter,
            Side::Right => Category::RightCharacter,
        }
    }

    /// Toggle a movement intent. Takes effect at the next velocity update.
    pub fn set_intent(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.moving_left = active,
            Direction::Right => self.moving_right = active,
        }
    }

    /// Net horizontal intent: -1, 0 or +1
    pub fn intent_axis(&self) -> f32 {
        (self.moving_right as i8 - self.moving_left as i8) as f32
    }

    pub fn is_running(&self) -> bool {
        self.moving_left != self.moving_right
    }

    /// Overwrite the horizontal velocity from the intent flags
    pub fn update_velocity(&self, world: &mut PhysicsWorld, frame_dt: f32) -> Result<(), SimError> {
        let body = world.body_mut(self.body)?;
        body.velocity.x = CHARACTER_SPEED * frame_dt * self.intent_axis();
        Ok(())
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self, world: &mut PhysicsWorld) -> Result<bool, SimError> {
        if !self.grounded {
            return Ok(false);
        }
        self.grounded = false;
        world.apply_impulse(self.body, Vec2::new(0.0, -JUMP_IMPULSE), Vec2::ZERO)?;
        log::debug!("{:?} bird jumped", self.side);
        Ok(true)
    }

    /// Advance the run cycle on a fixed cadence of simulation frames
    pub fn advance_animation(&mut self, frame_count: u64) {
        if self.is_running() && frame_count % RUN_ANIMATION_CADENCE == 0 {
            self.run_frame = (self.run_frame + 1) % RUN_ANIMATION_FRAMES;
        }
    }

    pub fn pose(&self) -> Pose {
        if self.is_running() {
            Pose::Running(self.run_frame)
        } else if !self.grounded {
            Pose::Airborne
        } else {
            Pose::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::PhysicsConfig;
    use proptest::prelude::*;

    fn setup() -> (PhysicsWorld, Character) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let bird = Character::spawn(&mut world, Side::Left).unwrap();
        (world, bird)
    }

    fn vx(world: &PhysicsWorld, bird: &Character) -> f32 {
        world.body(bird.body).unwrap().velocity.x
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut world, mut bird) = setup();
        assert!(bird.jump(&mut world).unwrap());
        let vy = world.body(bird.body).unwrap().velocity.y;
        assert!((vy + JUMP_IMPULSE / CHARACTER_MASS).abs() < 1e-3);

        // Spamming while airborne changes nothing
        for _ in 0..10 {
            assert!(!bird.jump(&mut world).unwrap());
        }
        assert_eq!(world.body(bird.body).unwrap().velocity.y, vy);
        assert!(!bird.grounded);
    }

    #[test]
    fn test_vertical_velocity_untouched_by_movement() {
        let (mut world, mut bird) = setup();
        world.body_mut(bird.body).unwrap().velocity.y = 123.0;
        bird.set_intent(Direction::Right, true);
        bird.update_velocity(&mut world, 0.016).unwrap();
        assert_eq!(world.body(bird.body).unwrap().velocity.y, 123.0);
    }

    #[test]
    fn test_pose_precedence() {
        let (_, mut bird) = setup();
        assert_eq!(bird.pose(), Pose::Idle);
        bird.grounded = false;
        assert_eq!(bird.pose(), Pose::Airborne);
        bird.set_intent(Direction::Left, true);
        assert_eq!(bird.pose(), Pose::Running(0));
        // Both held cancels out
        bird.set_intent(Direction::Right, true);
        assert_eq!(bird.pose(), Pose::Airborne);
    }

    #[test]
    fn test_run_cycle_cadence() {
        let (_, mut bird) = setup();
        bird.set_intent(Direction::Right, true);
        for frame in 1..=7 {
            bird.advance_animation(frame);
        }
        assert_eq!(bird.run_frame, 0);
        bird.advance_animation(8);
        assert_eq!(bird.run_frame, 1);
        bird.advance_animation(16);
        assert_eq!(bird.run_frame, 0);

        // Idle birds keep their frame
        bird.set_intent(Direction::Right, false);
        bird.advance_animation(24);
        assert_eq!(bird.run_frame, 0);
    }

    proptest! {
        #[test]
        fn prop_movement_symmetry(frame_dt in 0.001f32..0.1) {
            let (mut world, mut bird) = setup();

            bird.set_intent(Direction::Right, true);
            bird.update_velocity(&mut world, frame_dt).unwrap();
            let right = vx(&world, &bird);
            prop_assert_eq!(right, CHARACTER_SPEED * frame_dt);

            bird.set_intent(Direction::Right, false);
            bird.set_intent(Direction::Left, true);
            bird.update_velocity(&mut world, frame_dt).unwrap();
            prop_assert_eq!(vx(&world, &bird), -right);

            bird.set_intent(Direction::Right, true);
            bird.update_velocity(&mut world, frame_dt).unwrap();
            prop_assert_eq!(vx(&world, &bird), 0.0);

            bird.set_intent(Direction::Right, false);
            bird.set_intent(Direction::Left, false);
            bird.update_velocity(&mut world, frame_dt).unwrap();
            prop_assert_eq!(vx(&world, &bird), 0.0);
        }
    }
}
