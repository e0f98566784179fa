//! Proxy lifecycle guard.
//!
//! Every proxy in a pool carries one guard. The guard records which pool and
//! slot it belongs to and owns the proxy's lifecycle state:
//!
//! ```text
//! Inactive <-> Active
//!     \         /
//!      Destroyed   (terminal)
//! ```
//!
//! Deactivation only flips the state. Destruction additionally hands the
//! binding back exactly once, and the pool uses it to drop the proxy from its
//! bookkeeping. A guard that was never bound hands nothing back.

use mote_common::{PoolError, PoolId, PoolResult, ProxyHandle, ProxyState};

/// Back-reference from a guard to the pool slot it watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardBinding {
    /// Pool the proxy belongs to
    pub pool: PoolId,
    /// Slot of the watched proxy
    pub proxy: ProxyHandle,
}

/// Lifecycle state machine attached to one pooled proxy.
#[derive(Debug, Default)]
pub struct LifecycleGuard {
    binding: Option<GuardBinding>,
    state: ProxyState,
}

impl LifecycleGuard {
    /// Creates an unbound guard in the `Inactive` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the guard to its pool and proxy. May only be called once.
    pub fn initialize(&mut self, pool: PoolId, proxy: ProxyHandle) -> PoolResult<()> {
        if let Some(existing) = self.binding {
            return Err(PoolError::GuardAlreadyBound(existing.proxy));
        }
        if self.state.is_destroyed() {
            return Err(PoolError::InvalidTransition {
                from: self.state,
                to: ProxyState::Inactive,
            });
        }
        self.binding = Some(GuardBinding { pool, proxy });
        Ok(())
    }

    /// Current binding, if initialized and not yet destroyed.
    #[must_use]
    pub const fn binding(&self) -> Option<GuardBinding> {
        self.binding
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ProxyState {
        self.state
    }

    /// Marks the proxy active. Returns whether the state changed.
    pub fn activate(&mut self) -> PoolResult<bool> {
        self.transition(ProxyState::Active)
    }

    /// Marks the proxy inactive. Returns whether the state changed.
    pub fn deactivate(&mut self) -> PoolResult<bool> {
        self.transition(ProxyState::Inactive)
    }

    /// Moves to `Destroyed` and yields the binding so the pool can forget the
    /// proxy. Yields `None` if the guard was never bound or already fired.
    pub fn destroy(&mut self) -> Option<GuardBinding> {
        self.state = ProxyState::Destroyed;
        self.binding.take()
    }

    fn transition(&mut self, to: ProxyState) -> PoolResult<bool> {
        if !self.state.can_transition_to(to) {
            return Err(PoolError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        let changed = self.state != to;
        self.state = to;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_once() {
        let pool = PoolId::next();
        let handle = ProxyHandle::new(0, 0);
        let mut guard = LifecycleGuard::new();

        guard.initialize(pool, handle).expect("first bind succeeds");
        assert_eq!(guard.binding(), Some(GuardBinding { pool, proxy: handle }));

        let again = guard.initialize(pool, ProxyHandle::new(1, 0));
        assert_eq!(again, Err(PoolError::GuardAlreadyBound(handle)));
    }

    #[test]
    fn test_activate_deactivate() {
        let mut guard = LifecycleGuard::new();
        assert_eq!(guard.state(), ProxyState::Inactive);

        assert_eq!(guard.activate(), Ok(true));
        assert_eq!(guard.activate(), Ok(false));
        assert_eq!(guard.state(), ProxyState::Active);

        assert_eq!(guard.deactivate(), Ok(true));
        assert_eq!(guard.state(), ProxyState::Inactive);
    }

    #[test]
    fn test_deactivate_keeps_binding() {
        let mut guard = LifecycleGuard::new();
        guard
            .initialize(PoolId::next(), ProxyHandle::new(2, 1))
            .expect("bind succeeds");
        guard.activate().expect("activate succeeds");
        guard.deactivate().expect("deactivate succeeds");
        assert!(guard.binding().is_some());
    }

    #[test]
    fn test_destroy_yields_binding_once() {
        let pool = PoolId::next();
        let handle = ProxyHandle::new(4, 2);
        let mut guard = LifecycleGuard::new();
        guard.initialize(pool, handle).expect("bind succeeds");

        assert_eq!(guard.destroy(), Some(GuardBinding { pool, proxy: handle }));
        assert_eq!(guard.destroy(), None);
        assert_eq!(guard.state(), ProxyState::Destroyed);
    }

    #[test]
    fn test_destroy_unbound_is_noop() {
        let mut guard = LifecycleGuard::new();
        assert_eq!(guard.destroy(), None);
    }

    #[test]
    fn test_destroyed_rejects_transitions() {
        let mut guard = LifecycleGuard::new();
        let _ = guard.destroy();

        assert_eq!(
            guard.activate(),
            Err(PoolError::InvalidTransition {
                from: ProxyState::Destroyed,
                to: ProxyState::Active,
            })
        );
        assert!(guard.deactivate().is_err());
        assert!(guard.initialize(PoolId::next(), ProxyHandle::new(0, 0)).is_err());
    }
}
