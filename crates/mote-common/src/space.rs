//! Simulation space resolution.
//!
//! Particle simulations report positions either already in world space or
//! relative to the emitter's transform. Proxies always live in world space.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Coordinate frame particle positions are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimulationSpace {
    /// Positions are relative to the simulation's transform
    #[default]
    Local,
    /// Positions are already world-space
    World,
}

impl SimulationSpace {
    /// Maps a "simulate in world space" flag to a space.
    #[must_use]
    pub const fn from_world_flag(world_space: bool) -> Self {
        if world_space {
            Self::World
        } else {
            Self::Local
        }
    }

    /// Resolves a particle position to world space.
    #[must_use]
    pub fn to_world(self, local_to_world: &Affine3A, position: Vec3) -> Vec3 {
        match self {
            Self::Local => local_to_world.transform_point3(position),
            Self::World => position,
        }
    }
}
