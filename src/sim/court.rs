//! Static court geometry: the divider pole, two floor halves and two walls

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyHandle, Category, Material, RigidBody, Shape};
use super::state::Side;
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::error::ConfigError;
use crate::vec2;

fn wall_material() -> Result<Material, ConfigError> {
    Material::new(WALL_ELASTICITY, WALL_FRICTION)
}

/// Static box centered on `center`
fn add_box(
    world: &mut PhysicsWorld,
    center: Vec2,
    size: Vec2,
    category: Category,
) -> Result<BodyHandle, ConfigError> {
    let body = RigidBody::fixed(center, Shape::rect(size.x, size.y)?, wall_material()?, category);
    Ok(world.add(body))
}

/// The pole separating the two halves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divider {
    pub body: BodyHandle,
}

impl Divider {
    pub fn spawn(world: &mut PhysicsWorld) -> Result<Self, ConfigError> {
        let body = add_box(world, vec2(DIVIDER_CENTER), vec2(DIVIDER_SIZE), Category::Divider)?;
        Ok(Self { body })
    }
}

/// Floors (goal lines) and outer walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    pub left_floor: BodyHandle,
    pub right_floor: BodyHandle,
    pub left_wall: BodyHandle,
    pub right_wall: BodyHandle,
}

impl Boundary {
    pub fn spawn(world: &mut PhysicsWorld) -> Result<Self, ConfigError> {
        let floor_y = COURT_HEIGHT - FLOOR_INSET;
        let floor_size = Vec2::new(COURT_WIDTH / 2.0, FLOOR_THICKNESS);
        let wall_height = 5.0 * COURT_HEIGHT;

        let left_floor = add_box(
            world,
            Vec2::new(COURT_WIDTH / 4.0, floor_y),
            floor_size,
            Category::LeftFloor,
        )?;
        let right_floor = add_box(
            world,
            Vec2::new(COURT_WIDTH * 3.0 / 4.0, floor_y),
            floor_size,
            Category::RightFloor,
        )?;
        let left_wall = add_box(
            world,
            Vec2::new(-20.0, COURT_HEIGHT / 2.0),
            Vec2::new(40.0, wall_height),
            Category::LeftWall,
        )?;
        let right_wall = add_box(
            world,
            Vec2::new(COURT_WIDTH + 30.0, COURT_HEIGHT / 2.0),
            Vec2::new(50.0, wall_height),
            Category::RightWall,
        )?;

        Ok(Self {
            left_floor,
            right_floor,
            left_wall,
            right_wall,
        })
    }

    /// Floor category of a side (the line the opponent scores on)
    pub fn floor_category(side: Side) -> Category {
        match side {
            Side::Left => Category::LeftFloor,
            Side::Right => Category::RightFloor,
        }
    }

    /// Outer wall category of a side
    pub fn wall_category(side: Side) -> Category {
        match side {
            Side::Left => Category::LeftWall,
            Side::Right => Category::RightWall,
        }
    }
}
