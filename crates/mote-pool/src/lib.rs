//! # Mote Pool
//!
//! Pooled 2D circle colliders that follow live particles.
//!
//! Particle systems carry no collision geometry. This crate keeps a pool of
//! lightweight circle proxies in step with a particle simulation so physics
//! can collide against particles:
//! - Collider pool manager (per-step reconciliation)
//! - Arena-backed proxy pool with stable handles
//! - Lifecycle guards (active / inactive / destroyed)
//! - Particle source trait and an in-memory mock
//! - TOML configuration with validation
//! - Stats payload copied onto spawned proxies

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod arena;
pub mod config;
pub mod guard;
pub mod manager;
pub mod proxy;
pub mod source;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::arena::*;
    pub use crate::config::*;
    pub use crate::guard::*;
    pub use crate::manager::*;
    pub use crate::proxy::*;
    pub use crate::source::*;
    pub use crate::stats::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_manager_roundtrip() {
        let mut system = MockParticleSystem::new(16);
        system.set_particles(vec![
            Particle::new(Vec3::new(1.0, 2.0, 0.0), 2.0),
            Particle::new(Vec3::new(-1.0, 0.0, 0.0), 4.0),
        ]);

        let mut manager = ColliderPoolManager::new(ColliderConfig::default());
        manager.start(Some(&system)).expect("start succeeds");
        let report = manager.fixed_update(&system).expect("step succeeds");

        assert_eq!(report.active, 2);
        let radii: Vec<f32> = manager.active_colliders().map(|(_, p)| p.radius()).collect();
        assert_eq!(radii, vec![1.0, 2.0]);
    }
}
