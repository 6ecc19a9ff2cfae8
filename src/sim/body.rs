//! Rigid bodies and collision shapes
//!
//! Shapes are defined in local space relative to the body origin. Polygons
//! are stored counter-clockwise (positive signed area) so edge normals
//! `(e.y, -e.x)` point outward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{cross, cross_scalar};

/// Index of a body inside the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

/// Collision category tag. Only used to look up collision responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    LeftCharacter = 1,
    Ball = 2,
    LeftFloor = 3,
    LeftWall = 4,
    RightWall = 5,
    Divider = 6,
    RightFloor = 7,
    RightCharacter = 8,
}

/// Static bodies never move; dynamic bodies integrate gravity and impulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Surface response coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub elasticity: f32,
    pub friction: f32,
}

impl Material {
    pub fn new(elasticity: f32, friction: f32) -> Result<Self, ConfigError> {
        if !(elasticity.is_finite() && elasticity >= 0.0) {
            return Err(ConfigError::InvalidMaterial {
                name: "elasticity",
                value: elasticity,
            });
        }
        if !(friction.is_finite() && friction >= 0.0) {
            return Err(ConfigError::InvalidMaterial {
                name: "friction",
                value: friction,
            });
        }
        Ok(Self {
            elasticity,
            friction,
        })
    }

    /// Combined coefficients for a contact (product of both surfaces)
    pub fn combine(&self, other: &Material) -> Material {
        Material {
            elasticity: self.elasticity * other.elasticity,
            friction: self.friction * other.friction,
        }
    }
}

/// Collision geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(Shape::Circle { radius })
    }

    /// Convex polygon from vertices in either winding order
    pub fn polygon(vertices: &[Vec2]) -> Result<Self, ConfigError> {
        if vertices.len() < 3 {
            return Err(ConfigError::TooFewVertices(vertices.len()));
        }
        let area = signed_area(vertices);
        if !area.is_finite() || area.abs() < f32::EPSILON {
            return Err(ConfigError::DegeneratePolygon);
        }
        let mut vertices = vertices.to_vec();
        if area < 0.0 {
            vertices.reverse();
        }
        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            if cross(b - a, c - b) < -1e-3 {
                return Err(ConfigError::NonConvexPolygon);
            }
        }
        Ok(Shape::Polygon { vertices })
    }

    /// Axis-aligned box centered on the body origin
    pub fn rect(width: f32, height: f32) -> Result<Self, ConfigError> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::polygon(&[
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// Moment of inertia about the body origin for the given mass
    pub fn moment(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Polygon { vertices } => {
                let n = vertices.len();
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for i in 0..n {
                    let a = vertices[i];
                    let b = vertices[(i + 1) % n];
                    let c = cross(a, b).abs();
                    numerator += c * (a.dot(a) + a.dot(b) + b.dot(b));
                    denominator += c;
                }
                if denominator <= 0.0 {
                    0.0
                } else {
                    mass * numerator / (6.0 * denominator)
                }
            }
        }
    }
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| cross(vertices[i], vertices[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

/// A simulated rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rotation (radians)
    pub angle: f32,
    pub angular_velocity: f32,
    pub inv_mass: f32,
    /// Zero for static bodies and locked rotation
    pub inv_inertia: f32,
    pub shape: Shape,
    pub material: Material,
    pub category: Category,
    pub kind: BodyKind,
}

impl RigidBody {
    /// Dynamic body with inertia derived from its shape
    pub fn dynamic(
        position: Vec2,
        mass: f32,
        shape: Shape,
        material: Material,
        category: Category,
    ) -> Result<Self, ConfigError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ConfigError::InvalidMass(mass));
        }
        let moment = shape.moment(mass);
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            inv_mass: 1.0 / mass,
            inv_inertia: if moment > 0.0 { 1.0 / moment } else { 0.0 },
            shape,
            material,
            category,
            kind: BodyKind::Dynamic,
        })
    }

    /// Immovable body (infinite mass)
    pub fn fixed(position: Vec2, shape: Shape, material: Material, category: Category) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            inv_mass: 0.0,
            inv_inertia: 0.0,
            shape,
            material,
            category,
            kind: BodyKind::Static,
        }
    }

    /// Infinite moment of inertia: the body never rotates
    pub fn with_locked_rotation(mut self) -> Self {
        self.inv_inertia = 0.0;
        self.angular_velocity = 0.0;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Transform a local-space point to world space
    pub fn world_point(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.angle).rotate(local)
    }

    /// Polygon vertices in world space (empty for circles)
    pub fn world_vertices(&self) -> Vec<Vec2> {
        match &self.shape {
            Shape::Polygon { vertices } => vertices.iter().map(|v| self.world_point(*v)).collect(),
            Shape::Circle { .. } => Vec::new(),
        }
    }

    /// Velocity of a world-space point attached to the body
    pub fn point_velocity(&self, world_point: Vec2) -> Vec2 {
        self.velocity + cross_scalar(self.angular_velocity, world_point - self.position)
    }

    /// Instantaneous impulse at a world-space point
    pub fn apply_impulse_at(&mut self, impulse: Vec2, world_point: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += cross(world_point - self.position, impulse) * self.inv_inertia;
    }
}
