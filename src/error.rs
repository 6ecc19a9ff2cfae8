//! Error types
//!
//! Configuration errors are fatal and raised while the court is being built.
//! Simulation errors are raised by the stepping API.

use thiserror::Error;

/// Invalid body, shape or physics parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("dynamic body mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon has zero area")]
    DegeneratePolygon,
    #[error("polygon is not convex")]
    NonConvexPolygon,
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidMaterial { name: &'static str, value: f32 },
    #[error("physics config field `{0}` is out of range")]
    InvalidPhysics(&'static str),
    #[error("settings: {0}")]
    Settings(String),
}

/// Errors raised while advancing the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
    #[error("no body with handle {0}")]
    UnknownBody(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
