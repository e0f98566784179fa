//! # Mote Common
//!
//! Common types and shared abstractions for Mote.
//!
//! This crate provides foundational types used by the collider pool and its
//! drivers:
//! - ID types (EntityId, PoolId, ProxyHandle, Layer)
//! - Proxy lifecycle states
//! - Simulation space resolution
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod space;
pub mod state;

pub use glam;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::space::*;
    pub use crate::state::*;
    pub use glam::{Affine3A, Vec2, Vec3};
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        assert!(ProxyState::Active.can_transition_to(ProxyState::Inactive));
        assert!(ProxyState::Inactive.can_transition_to(ProxyState::Active));
        assert!(ProxyState::Inactive.can_transition_to(ProxyState::Destroyed));
        assert!(!ProxyState::Destroyed.can_transition_to(ProxyState::Active));
        assert!(!ProxyState::Destroyed.can_transition_to(ProxyState::Inactive));
    }

    #[test]
    fn test_pool_error_converts() {
        let err: MoteError = PoolError::MissingSimulation.into();
        assert!(matches!(err, MoteError::Pool(PoolError::MissingSimulation)));
    }

    proptest! {
        #[test]
        fn layer_new_accepts_exactly_valid_range(index in 0u8..=255) {
            prop_assert_eq!(Layer::new(index).is_ok(), index <= Layer::MAX);
            prop_assert!(Layer::saturating(index).index() <= Layer::MAX);
        }
    }
}
