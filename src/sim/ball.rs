//! The volleyball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyHandle, Category, Material, RigidBody, Shape};
use super::state::Side;
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::error::{ConfigError, SimError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: BodyHandle,
}

impl Ball {
    /// Create the ball above the left half and register it
    pub fn spawn(world: &mut PhysicsWorld) -> Result<Self, ConfigError> {
        let body = RigidBody::dynamic(
            Self::spawn_point(Side::Left),
            BALL_MASS,
            Shape::circle(BALL_RADIUS)?,
            Material::new(BALL_ELASTICITY, BALL_FRICTION)?,
            Category::Ball,
        )?;
        Ok(Self {
            body: world.add(body),
        })
    }

    /// Serve position above the middle of a side's half
    pub fn spawn_point(side: Side) -> Vec2 {
        let x = match side {
            Side::Left => COURT_WIDTH / 4.0,
            Side::Right => COURT_WIDTH * 3.0 / 4.0,
        };
        Vec2::new(x, BALL_SPAWN_Y)
    }

    /// Per-frame air drag on the vertical component only
    pub fn update(&self, world: &mut PhysicsWorld) -> Result<(), SimError> {
        let body = world.body_mut(self.body)?;
        body.velocity.y *= BALL_VERTICAL_DAMPING;
        Ok(())
    }

    /// Put the ball back above `side`'s half, at rest
    pub fn reset(&self, world: &mut PhysicsWorld, side: Side) -> Result<(), SimError> {
        let body = world.body_mut(self.body)?;
        body.position = Self::spawn_point(side);
        body.velocity = Vec2::ZERO;
        body.angular_velocity = 0.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::PhysicsConfig;
    use proptest::prelude::*;

    fn setup() -> (PhysicsWorld, Ball) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let ball = Ball::spawn(&mut world).unwrap();
        (world, ball)
    }

    #[test]
    fn test_reset_to_spawn() {
        let (mut world, ball) = setup();
        {
            let body = world.body_mut(ball.body).unwrap();
            body.position = Vec2::new(700.0, 500.0);
            body.velocity = Vec2::new(-40.0, 300.0);
            body.angular_velocity = 2.0;
        }
        ball.reset(&mut world, Side::Right).unwrap();
        let body = world.body(ball.body).unwrap();
        assert_eq!(body.position, Vec2::new(630.0, BALL_SPAWN_Y));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_free_fall_damped_against_undamped_model() {
        let (mut world, ball) = setup();
        world.body_mut(ball.body).unwrap().velocity.x = 50.0;

        let mut undamped = 0.0f32;
        for _ in 0..20 {
            world.step(FIXED_DT).unwrap();
            ball.update(&mut world).unwrap();
            undamped += GRAVITY * FIXED_DT;

            let body = world.body(ball.body).unwrap();
            assert!(body.velocity.y > 0.0);
            assert!(body.velocity.y < undamped);
            assert_eq!(body.velocity.x, 50.0);
        }
    }

    proptest! {
        #[test]
        fn prop_damping_only_touches_vertical(vx in -500.0f32..500.0, vy in -900.0f32..900.0) {
            let (mut world, ball) = setup();
            world.body_mut(ball.body).unwrap().velocity = Vec2::new(vx, vy);
            ball.update(&mut world).unwrap();
            let v = world.body(ball.body).unwrap().velocity;
            prop_assert_eq!(v.x, vx);
            prop_assert_eq!(v.y, vy * BALL_VERTICAL_DAMPING);
            prop_assert!(v.y.abs() <= vy.abs());
        }
    }
}
