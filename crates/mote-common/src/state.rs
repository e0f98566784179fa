//! Lifecycle states of a pooled proxy.

use std::fmt;

/// Where a pooled proxy is in its lifecycle.
///
/// `Active` and `Inactive` alternate freely; `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProxyState {
    /// Tracking a sampled particle this step
    Active,
    /// Kept in the pool but ignored by physics
    #[default]
    Inactive,
    /// Removed from the pool; the slot has been released
    Destroyed,
}

impl ProxyState {
    /// Returns true for `Active`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true for `Destroyed`.
    #[must_use]
    pub const fn is_destroyed(self) -> bool {
        matches!(self, Self::Destroyed)
    }

    /// Checks whether moving from `self` to `to` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        !matches!(self, Self::Destroyed) || matches!(to, Self::Destroyed)
    }
}

impl fmt::Display for ProxyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}
