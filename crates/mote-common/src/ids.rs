//! ID types for owners, pools, proxies, and collision layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::error::ConfigError;

/// Global counter for entity IDs.
static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Global counter for pool IDs.
static POOL_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Unique identifier for an object that can own proxies (a pool manager's host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new unique entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one proxy pool. Guards record it so a binding can only be
/// honoured by the pool that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u32);

impl PoolId {
    /// Allocates a fresh pool ID.
    #[must_use]
    pub fn next() -> Self {
        Self(POOL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable handle to a proxy slot.
///
/// The generation is bumped whenever the slot is freed, so a handle that
/// outlives its proxy never resolves to the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyHandle {
    index: u32,
    generation: u32,
}

impl ProxyHandle {
    /// Creates a handle from a slot index and generation.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ProxyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProxyHandle(idx={}, gen={})", self.index, self.generation)
    }
}

/// Collision layer index (0..=31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Layer(u8);

impl Layer {
    /// Highest valid layer index.
    pub const MAX: u8 = 31;

    /// Creates a layer, rejecting indices above [`Layer::MAX`].
    pub fn new(index: u8) -> Result<Self, ConfigError> {
        if index > Self::MAX {
            Err(ConfigError::LayerOutOfRange(index))
        } else {
            Ok(Self(index))
        }
    }

    /// Creates a layer, clamping out-of-range indices to [`Layer::MAX`].
    #[must_use]
    pub const fn saturating(index: u8) -> Self {
        if index > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(index)
        }
    }

    /// Returns the raw layer index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the single-bit mask for this layer.
    #[must_use]
    pub const fn mask(self) -> LayerMask {
        LayerMask(1 << self.0)
    }
}

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(u32);

impl LayerMask {
    /// Mask matching every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask matching no layer.
    pub const NONE: Self = Self(0);

    /// Creates a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns this mask with `layer` added.
    #[must_use]
    pub const fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.mask().0)
    }

    /// Checks whether `layer` is part of this mask.
    #[must_use]
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.mask().0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_bounds() {
        assert!(Layer::new(0).is_ok());
        assert!(Layer::new(31).is_ok());
        assert!(matches!(
            Layer::new(32),
            Err(ConfigError::LayerOutOfRange(32))
        ));
        assert_eq!(Layer::saturating(200).index(), 31);
    }

    #[test]
    fn test_layer_mask() {
        let five = Layer::new(5).expect("valid layer");
        let nine = Layer::new(9).expect("valid layer");
        let mask = LayerMask::NONE.with(five);

        assert!(mask.contains(five));
        assert!(!mask.contains(nine));
        assert!(LayerMask::ALL.contains(nine));
        assert_eq!(five.mask(), LayerMask::from_bits(1 << 5));
    }

    #[test]
    fn test_pool_ids_are_distinct() {
        assert_ne!(PoolId::next(), PoolId::next());
    }

    #[test]
    fn test_handle_display() {
        let handle = ProxyHandle::new(3, 7);
        assert_eq!(handle.to_string(), "ProxyHandle(idx=3, gen=7)");
    }
}
