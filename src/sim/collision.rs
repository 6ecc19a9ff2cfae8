//! Narrow-phase collision detection
//!
//! Circle/circle, circle/polygon and polygon/polygon (separating axis) tests.
//! Every test reports the normal pointing from the first shape toward the
//! second, so pushing the second body along it separates the pair.

use glam::Vec2;

use super::body::{RigidBody, Shape};

/// Result of a collision check between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Contact point in world space
    pub point: Vec2,
    /// Unit normal from body A toward body B
    pub normal: Vec2,
    /// Penetration depth (zero when exactly touching)
    pub penetration: f32,
}

impl CollisionResult {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Test two bodies for overlap
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<CollisionResult> {
    match (&a.shape, &b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position, *ra, b.position, *rb)
        }
        (Shape::Circle { radius }, Shape::Polygon { .. }) => {
            // polygon -> circle normal, flipped to circle -> polygon
            circle_polygon(a.position, *radius, &b.world_vertices()).map(CollisionResult::flipped)
        }
        (Shape::Polygon { .. }, Shape::Circle { radius }) => {
            circle_polygon(b.position, *radius, &a.world_vertices())
        }
        (Shape::Polygon { .. }, Shape::Polygon { .. }) => {
            polygon_polygon(&a.world_vertices(), &b.world_vertices())
        }
    }
}

/// Circle vs circle. Normal points from A to B.
pub fn circle_circle(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<CollisionResult> {
    let delta = pos_b - pos_a;
    let dist_sq = delta.length_squared();
    let sum_r = radius_a + radius_b;
    if dist_sq > sum_r * sum_r {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers: pick an arbitrary but stable axis
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::NEG_Y };
    let penetration = sum_r - dist;
    Some(CollisionResult {
        point: pos_a + normal * (radius_a - penetration * 0.5),
        normal,
        penetration,
    })
}

/// Circle vs convex polygon (world-space, counter-clockwise vertices).
///
/// Normal points from the polygon toward the circle.
pub fn circle_polygon(center: Vec2, radius: f32, vertices: &[Vec2]) -> Option<CollisionResult> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    // Edge of maximum separation
    let mut best_dist = f32::NEG_INFINITY;
    let mut best_normal = Vec2::ZERO;
    let mut best_idx = 0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let edge = b - a;
        let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        let d = (center - a).dot(normal);
        if d > best_dist {
            best_dist = d;
            best_normal = normal;
            best_idx = i;
        }
    }

    if best_dist > radius {
        return None;
    }

    // Center inside the polygon: push out through the nearest face
    if best_dist < 0.0 {
        return Some(CollisionResult {
            point: center - best_normal * best_dist,
            normal: best_normal,
            penetration: radius - best_dist,
        });
    }

    // Voronoi region of the best edge: vertex A, vertex B or the face
    let a = vertices[best_idx];
    let b = vertices[(best_idx + 1) % n];
    let edge = b - a;
    let edge_len_sq = edge.length_squared();
    let t = if edge_len_sq > 0.0 {
        (center - a).dot(edge) / edge_len_sq
    } else {
        0.0
    };

    let corner = if t < 0.0 {
        Some(a)
    } else if t > 1.0 {
        Some(b)
    } else {
        None
    };

    match corner {
        Some(v) => {
            let delta = center - v;
            let dist = delta.length();
            if dist > radius {
                return None;
            }
            let normal = if dist > f32::EPSILON { delta / dist } else { best_normal };
            Some(CollisionResult {
                point: v,
                normal,
                penetration: radius - dist,
            })
        }
        None => Some(CollisionResult {
            point: center - best_normal * best_dist,
            normal: best_normal,
            penetration: radius - best_dist,
        }),
    }
}

/// Convex polygon vs convex polygon using the separating axis theorem.
///
/// Normal points from A to B; the contact point is B's deepest vertex.
pub fn polygon_polygon(verts_a: &[Vec2], verts_b: &[Vec2]) -> Option<CollisionResult> {
    if verts_a.len() < 3 || verts_b.len() < 3 {
        return None;
    }

    let (depth_a, normal_a) = min_overlap_axis(verts_a, verts_b)?;
    let (depth_b, normal_b) = min_overlap_axis(verts_b, verts_a)?;
    let (penetration, mut normal) = if depth_a <= depth_b {
        (depth_a, normal_a)
    } else {
        (depth_b, normal_b)
    };

    let center_a = centroid(verts_a);
    let center_b = centroid(verts_b);
    if (center_b - center_a).dot(normal) < 0.0 {
        normal = -normal;
    }

    let point = verts_b
        .iter()
        .copied()
        .min_by(|p, q| p.dot(normal).total_cmp(&q.dot(normal)))
        .unwrap_or(center_b);

    Some(CollisionResult {
        point,
        normal,
        penetration,
    })
}

/// Test the edge normals of `reference` as separating axes.
/// Returns the smallest overlap and its axis, or `None` if separated.
fn min_overlap_axis(reference: &[Vec2], other: &[Vec2]) -> Option<(f32, Vec2)> {
    let n = reference.len();
    let mut min_depth = f32::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for i in 0..n {
        let edge = reference[(i + 1) % n] - reference[i];
        let axis = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        if axis == Vec2::ZERO {
            continue;
        }

        let (min_a, max_a) = project(reference, axis);
        let (min_b, max_b) = project(other, axis);
        if max_a < min_b || max_b < min_a {
            return None;
        }

        let depth = (max_a - min_b).min(max_b - min_a);
        if depth < min_depth {
            min_depth = depth;
            best_axis = axis;
        }
    }

    Some((min_depth, best_axis))
}

fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)))
}

fn centroid(vertices: &[Vec2]) -> Vec2 {
    vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32
}
