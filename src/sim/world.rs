//! Rigid-body world
//!
//! One `step` runs the whole physics pipeline:
//!
//! 1. Integrate gravity into dynamic velocities
//! 2. Integrate positions (semi-implicit Euler)
//! 3. Brute-force pair detection in body-index order
//! 4. Sequential impulse solve (restitution + Coulomb friction)
//! 5. Positional correction down to the contact slop
//!
//! The resolved contacts are returned so the collision rules can react to
//! them. Contacts are tagged with whether they began this step.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyHandle, Category, RigidBody};
use super::collision::{CollisionResult, collide};
use crate::consts::{CONTACT_SLOP, FIXED_DT, GRAVITY};
use crate::cross;
use crate::error::{ConfigError, SimError};

/// Configuration for the physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration (y grows downward)
    pub gravity: Vec2,
    /// Fixed timestep used by the game loop
    pub fixed_timestep: f32,
    /// Impulse solver iterations per step
    pub solver_iterations: u32,
    /// Allowed penetration left after position correction
    pub contact_slop: f32,
    /// Approach speeds below this do not bounce
    pub restitution_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY),
            fixed_timestep: FIXED_DT,
            solver_iterations: 8,
            contact_slop: CONTACT_SLOP,
            restitution_threshold: 20.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidPhysics("gravity"));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::InvalidPhysics("fixed_timestep"));
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::InvalidPhysics("solver_iterations"));
        }
        if !(self.contact_slop.is_finite() && self.contact_slop >= 0.0) {
            return Err(ConfigError::InvalidPhysics("contact_slop"));
        }
        if !(self.restitution_threshold.is_finite() && self.restitution_threshold >= 0.0) {
            return Err(ConfigError::InvalidPhysics("restitution_threshold"));
        }
        Ok(())
    }
}

/// A resolved contact between two bodies (a < b by handle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub category_a: Category,
    pub category_b: Category,
    /// The pair was not touching at the end of the previous step
    pub began: bool,
    pub contact: CollisionResult,
}

impl ContactPair {
    /// The handle of the body carrying `category`, if either does
    pub fn body_with(&self, category: Category) -> Option<BodyHandle> {
        if self.category_a == category {
            Some(self.a)
        } else if self.category_b == category {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Per-contact solver scratch
struct SolverContact {
    a: usize,
    b: usize,
    normal: Vec2,
    point: Vec2,
    penetration: f32,
    normal_mass: f32,
    tangent_mass: f32,
    friction: f32,
    bounce: f32,
    normal_impulse: f32,
    tangent_impulse: f32,
}

/// Owns every rigid body and advances them in fixed steps
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Vec<RigidBody>,
    /// Pairs touching at the end of the last step
    touching: BTreeSet<(BodyHandle, BodyHandle)>,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bodies: Vec::new(),
            touching: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Register a body. Handles are stable for the lifetime of the world.
    pub fn add(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(body);
        handle
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody, SimError> {
        self.bodies.get(handle.0).ok_or(SimError::UnknownBody(handle.0))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, SimError> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(SimError::UnknownBody(handle.0))
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Instantaneous velocity change from an impulse applied at a point
    /// given in the body's local space
    pub fn apply_impulse(
        &mut self,
        handle: BodyHandle,
        impulse: Vec2,
        local_point: Vec2,
    ) -> Result<(), SimError> {
        let body = self.body_mut(handle)?;
        let world_point = body.world_point(local_point);
        body.apply_impulse_at(impulse, world_point);
        Ok(())
    }

    /// Advance the simulation by `dt` seconds and return the resolved contacts
    pub fn step(&mut self, dt: f32) -> Result<Vec<ContactPair>, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Rejected physics step with dt = {}", dt);
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.bodies.iter().all(RigidBody::is_static) {
            return Ok(Vec::new());
        }

        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
        }

        let detected = self.detect();

        let mut solver: Vec<SolverContact> = detected
            .iter()
            .map(|&(a, b, hit)| self.prepare(a, b, hit))
            .collect();
        for _ in 0..self.config.solver_iterations {
            for contact in &mut solver {
                solve_velocity(&mut self.bodies, contact);
            }
        }
        for contact in &solver {
            self.correct_position(contact);
        }

        let previous = std::mem::take(&mut self.touching);
        let mut pairs = Vec::with_capacity(detected.len());
        for (a, b, contact) in detected {
            let key = (BodyHandle(a), BodyHandle(b));
            self.touching.insert(key);
            pairs.push(ContactPair {
                a: key.0,
                b: key.1,
                category_a: self.bodies[a].category,
                category_b: self.bodies[b].category,
                began: !previous.contains(&key),
                contact,
            });
        }
        Ok(pairs)
    }

    /// Every overlapping pair, skipping static/static
    fn detect(&self) -> Vec<(usize, usize, CollisionResult)> {
        let mut contacts = Vec::new();
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                if let Some(hit) = collide(a, b) {
                    contacts.push((i, j, hit));
                }
            }
        }
        contacts
    }

    fn prepare(&self, a: usize, b: usize, hit: CollisionResult) -> SolverContact {
        let (body_a, body_b) = (&self.bodies[a], &self.bodies[b]);
        let normal = hit.normal;
        let tangent = Vec2::new(-normal.y, normal.x);
        let r_a = hit.point - body_a.position;
        let r_b = hit.point - body_b.position;

        let effective_mass = |axis: Vec2| {
            let ra = cross(r_a, axis);
            let rb = cross(r_b, axis);
            let k = body_a.inv_mass
                + body_b.inv_mass
                + body_a.inv_inertia * ra * ra
                + body_b.inv_inertia * rb * rb;
            if k > 0.0 { 1.0 / k } else { 0.0 }
        };

        let combined = body_a.material.combine(&body_b.material);
        let approach = (body_b.point_velocity(hit.point) - body_a.point_velocity(hit.point)).dot(normal);
        let bounce = if approach < -self.config.restitution_threshold {
            -combined.elasticity * approach
        } else {
            0.0
        };

        SolverContact {
            a,
            b,
            normal,
            point: hit.point,
            penetration: hit.penetration,
            normal_mass: effective_mass(normal),
            tangent_mass: effective_mass(tangent),
            friction: combined.friction,
            bounce,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }
    }

    /// Push the pair apart so at most `contact_slop` of penetration remains
    fn correct_position(&mut self, contact: &SolverContact) {
        let inv_a = self.bodies[contact.a].inv_mass;
        let inv_b = self.bodies[contact.b].inv_mass;
        let total = inv_a + inv_b;
        let excess = contact.penetration - self.config.contact_slop;
        if total <= 0.0 || excess <= 0.0 {
            return;
        }
        let correction = contact.normal * (excess / total);
        self.bodies[contact.a].position -= correction * inv_a;
        self.bodies[contact.b].position += correction * inv_b;
    }
}

/// One sequential-impulse pass over a contact
fn solve_velocity(bodies: &mut [RigidBody], c: &mut SolverContact) {
    // Normal: accumulated impulse is clamped non-negative
    let vn = relative_velocity(bodies, c).dot(c.normal);
    let delta = c.normal_mass * (c.bounce - vn);
    let accumulated = (c.normal_impulse + delta).max(0.0);
    let applied = accumulated - c.normal_impulse;
    c.normal_impulse = accumulated;
    apply_pair(bodies, c.a, c.b, c.normal * applied, c.point);

    // Friction: bounded by μ times the normal impulse
    let tangent = Vec2::new(-c.normal.y, c.normal.x);
    let vt = relative_velocity(bodies, c).dot(tangent);
    let max_friction = c.friction * c.normal_impulse;
    let accumulated = (c.tangent_impulse - c.tangent_mass * vt).clamp(-max_friction, max_friction);
    let applied = accumulated - c.tangent_impulse;
    c.tangent_impulse = accumulated;
    apply_pair(bodies, c.a, c.b, tangent * applied, c.point);
}

fn relative_velocity(bodies: &[RigidBody], c: &SolverContact) -> Vec2 {
    bodies[c.b].point_velocity(c.point) - bodies[c.a].point_velocity(c.point)
}

fn apply_pair(bodies: &mut [RigidBody], a: usize, b: usize, impulse: Vec2, point: Vec2) {
    bodies[a].apply_impulse_at(-impulse, point);
    bodies[b].apply_impulse_at(impulse, point);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Material, Shape};

    fn material() -> Material {
        Material::new(0.4, 0.5).unwrap()
    }

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig::default()).unwrap()
    }

    fn floor(world: &mut PhysicsWorld) -> BodyHandle {
        world.add(RigidBody::fixed(
            Vec2::new(0.0, 100.0),
            Shape::rect(1000.0, 20.0).unwrap(),
            material(),
            Category::LeftFloor,
        ))
    }

    fn ball_at(world: &mut PhysicsWorld, position: Vec2, elasticity: f32) -> BodyHandle {
        world.add(
            RigidBody::dynamic(
                position,
                1.0,
                Shape::circle(10.0).unwrap(),
                Material::new(elasticity, 0.4).unwrap(),
                Category::Ball,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_rejects_bad_timesteps() {
        let mut world = world();
        let ball = ball_at(&mut world, Vec2::ZERO, 1.0);
        let before = world.body(ball).unwrap().position;
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(world.step(dt), Err(SimError::InvalidTimestep(_))));
        }
        assert_eq!(world.body(ball).unwrap().position, before);
    }

    #[test]
    fn test_all_static_world_steps() {
        let mut world = world();
        floor(&mut world);
        world.add(RigidBody::fixed(
            Vec2::new(0.0, 95.0),
            Shape::rect(10.0, 10.0).unwrap(),
            material(),
            Category::Divider,
        ));
        assert!(world.step(FIXED_DT).unwrap().is_empty());
        assert_eq!(world.body(BodyHandle(0)).unwrap().position, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_free_fall_is_semi_implicit_euler() {
        let mut world = world();
        let ball = ball_at(&mut world, Vec2::ZERO, 1.0);
        world.step(FIXED_DT).unwrap();
        let body = world.body(ball).unwrap();
        let v = GRAVITY * FIXED_DT;
        assert!((body.velocity.y - v).abs() < 1e-4);
        assert!((body.position.y - v * FIXED_DT).abs() < 1e-4);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let mut world = world();
        let floor = floor(&mut world);
        let ball = ball_at(&mut world, Vec2::new(0.0, 80.0), 1.0);
        world.body_mut(ball).unwrap().velocity = Vec2::new(0.0, 500.0);
        for _ in 0..30 {
            world.step(FIXED_DT).unwrap();
        }
        let body = world.body(floor).unwrap();
        assert_eq!(body.position, Vec2::new(0.0, 100.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_bounce_scales_with_combined_elasticity() {
        let rebound = |elasticity: f32| {
            let mut world = world();
            floor(&mut world);
            let ball = ball_at(&mut world, Vec2::new(0.0, 78.0), elasticity);
            world.body_mut(ball).unwrap().velocity = Vec2::new(0.0, 300.0);
            world.step(FIXED_DT).unwrap();
            world.body(ball).unwrap().velocity.y
        };
        let lively = rebound(2.0);
        let dull = rebound(0.5);
        assert!(lively < 0.0, "ball should move up after the bounce");
        assert!(lively < dull);
    }

    #[test]
    fn test_contact_begins_once() {
        let mut world = world();
        floor(&mut world);
        let ball = ball_at(&mut world, Vec2::new(0.0, 80.0), 0.0);
        let first = world.step(FIXED_DT).unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].began);
        assert_eq!(first[0].body_with(Category::Ball), Some(ball));

        let second = world.step(FIXED_DT).unwrap();
        assert_eq!(second.len(), 1);
        assert!(!second[0].began);

        // Teleport away: the contact ends, then begins again on return
        world.body_mut(ball).unwrap().position = Vec2::new(0.0, -500.0);
        world.body_mut(ball).unwrap().velocity = Vec2::ZERO;
        assert!(world.step(FIXED_DT).unwrap().is_empty());
        world.body_mut(ball).unwrap().position = Vec2::new(0.0, 80.0);
        assert!(world.step(FIXED_DT).unwrap()[0].began);
    }

    #[test]
    fn test_penetration_corrected_to_slop() {
        let mut world = world();
        floor(&mut world);
        let ball = ball_at(&mut world, Vec2::new(0.0, 85.0), 0.0);
        world.step(FIXED_DT).unwrap();
        let bottom = world.body(ball).unwrap().position.y + 10.0;
        assert!(bottom - 90.0 <= CONTACT_SLOP + 1e-3);
    }

    #[test]
    fn test_apply_impulse_unknown_body() {
        let mut world = world();
        assert_eq!(
            world.apply_impulse(BodyHandle(3), Vec2::ONE, Vec2::ZERO),
            Err(SimError::UnknownBody(3))
        );
    }
}
