//! Proxy pool with arena-based storage.

use glam::Vec2;
use mote_common::{LayerMask, PoolError, PoolId, PoolResult, ProxyHandle, ProxyState};
use tracing::{debug, warn};

use crate::guard::LifecycleGuard;
use crate::proxy::ColliderProxy;

/// A proxy together with its guard and idle counter.
#[derive(Debug)]
struct PooledEntry {
    proxy: ColliderProxy,
    guard: LifecycleGuard,
    /// Consecutive steps spent inactive
    idle_steps: u32,
}

/// One storage slot. The generation advances every time the slot is freed.
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<PooledEntry>,
}

/// Arena-based proxy storage for allocation-free reuse.
///
/// Slots are recycled through a free list. On top of the slots the arena keeps
/// the pool sequence: live handles in insertion order, each exactly once.
/// Pool slot `j` means the `j`-th handle of that sequence.
#[derive(Debug)]
pub struct ProxyArena {
    /// Identity recorded by every guard in this arena
    id: PoolId,
    /// Storage slots for proxies
    slots: Vec<Slot>,
    /// Free slot indices for reuse
    free_list: Vec<u32>,
    /// Live handles in insertion order
    order: Vec<ProxyHandle>,
}

impl Default for ProxyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: PoolId::next(),
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Identity of this pool.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Number of proxies in the pool sequence (active or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the pool holds no proxies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total slot count, including free slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of active proxies.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Adds a proxy to the end of the pool sequence and binds its guard.
    pub fn insert(&mut self, proxy: ColliderProxy) -> PoolResult<ProxyHandle> {
        let index = if let Some(free_index) = self.free_list.pop() {
            free_index
        } else {
            self.slots.push(Slot::default());
            (self.slots.len() - 1) as u32
        };

        let slot = &mut self.slots[index as usize];
        let handle = ProxyHandle::new(index, slot.generation);

        let mut guard = LifecycleGuard::new();
        guard.initialize(self.id, handle)?;

        slot.entry = Some(PooledEntry {
            proxy,
            guard,
            idle_steps: 0,
        });
        self.order.push(handle);
        Ok(handle)
    }

    /// Destroys a proxy.
    ///
    /// The proxy's guard fires and only a binding issued by this pool removes
    /// a handle from the pool sequence. The slot is freed and every copy of
    /// `handle` goes stale.
    pub fn destroy(&mut self, handle: ProxyHandle) -> PoolResult<ColliderProxy> {
        let slot = self
            .slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .ok_or(PoolError::StaleHandle(handle))?;
        let mut entry = slot.entry.take().ok_or(PoolError::StaleHandle(handle))?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index());

        match entry.guard.destroy() {
            Some(binding) if binding.pool == self.id => {
                if let Some(position) = self.order.iter().position(|&h| h == binding.proxy) {
                    self.order.remove(position);
                }
            },
            _ => warn!("Proxy {handle} had no guard bound to this pool; sequence left as is"),
        }

        debug!("Destroyed proxy {handle}");
        Ok(entry.proxy)
    }

    /// Destroys every proxy in the pool. Returns how many were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let handles: Vec<ProxyHandle> = self.order.clone();
        handles
            .into_iter()
            .filter(|&handle| self.destroy(handle).is_ok())
            .count()
    }

    /// Handle at pool slot `position`.
    #[must_use]
    pub fn handle_at(&self, position: usize) -> Option<ProxyHandle> {
        self.order.get(position).copied()
    }

    /// Live handles in pool order.
    #[must_use]
    pub fn handles(&self) -> &[ProxyHandle] {
        &self.order
    }

    /// Checks if `handle` refers to a live proxy.
    #[must_use]
    pub fn contains(&self, handle: ProxyHandle) -> bool {
        self.entry(handle).is_ok()
    }

    /// Gets a proxy by handle.
    pub fn get(&self, handle: ProxyHandle) -> PoolResult<&ColliderProxy> {
        self.entry(handle).map(|entry| &entry.proxy)
    }

    /// Gets a mutable proxy by handle.
    pub fn get_mut(&mut self, handle: ProxyHandle) -> PoolResult<&mut ColliderProxy> {
        self.entry_mut(handle).map(|entry| &mut entry.proxy)
    }

    /// Gets the proxy at pool slot `position`.
    pub fn get_at_mut(&mut self, position: usize) -> Option<&mut ColliderProxy> {
        let handle = self.handle_at(position)?;
        self.get_mut(handle).ok()
    }

    /// Lifecycle state of a proxy.
    pub fn state(&self, handle: ProxyHandle) -> PoolResult<ProxyState> {
        self.entry(handle).map(|entry| entry.guard.state())
    }

    /// Consecutive steps the proxy has spent inactive.
    pub fn idle_steps(&self, handle: ProxyHandle) -> PoolResult<u32> {
        self.entry(handle).map(|entry| entry.idle_steps)
    }

    /// Activates or deactivates a proxy. Returns whether the state changed.
    ///
    /// Deactivation keeps the proxy in the pool.
    pub fn set_active(&mut self, handle: ProxyHandle, active: bool) -> PoolResult<bool> {
        let entry = self.entry_mut(handle)?;
        if active {
            entry.idle_steps = 0;
            entry.guard.activate()
        } else {
            entry.guard.deactivate()
        }
    }

    /// Advances the idle counter of every inactive proxy by one step.
    pub fn tick_idle(&mut self) {
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                if !entry.guard.state().is_active() {
                    entry.idle_steps = entry.idle_steps.saturating_add(1);
                }
            }
        }
    }

    /// Inactive proxies idle for at least `threshold` steps, in pool order.
    #[must_use]
    pub fn idle_handles(&self, threshold: u32) -> Vec<ProxyHandle> {
        self.order
            .iter()
            .copied()
            .filter(|&handle| {
                self.entry(handle).is_ok_and(|entry| {
                    !entry.guard.state().is_active() && entry.idle_steps >= threshold
                })
            })
            .collect()
    }

    /// Iterates every proxy in pool order with its state.
    pub fn iter(&self) -> impl Iterator<Item = (ProxyHandle, &ColliderProxy, ProxyState)> + '_ {
        self.order.iter().filter_map(move |&handle| {
            self.entry(handle)
                .ok()
                .map(|entry| (handle, &entry.proxy, entry.guard.state()))
        })
    }

    /// Iterates active proxies in pool order.
    pub fn iter_active(&self) -> impl Iterator<Item = (ProxyHandle, &ColliderProxy)> + '_ {
        self.iter()
            .filter(|(_, _, state)| state.is_active())
            .map(|(handle, proxy, _)| (handle, proxy))
    }

    /// Active proxies on a layer in `mask` whose circle intersects the query circle.
    pub fn overlapping(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
    ) -> impl Iterator<Item = ProxyHandle> + '_ {
        self.iter_active()
            .filter(move |(_, proxy)| {
                mask.contains(proxy.layer()) && proxy.overlaps_circle(center, radius)
            })
            .map(|(handle, _)| handle)
    }

    fn entry(&self, handle: ProxyHandle) -> PoolResult<&PooledEntry> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.entry.as_ref())
            .ok_or(PoolError::StaleHandle(handle))
    }

    fn entry_mut(&mut self, handle: ProxyHandle) -> PoolResult<&mut PooledEntry> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.entry.as_mut())
            .ok_or(PoolError::StaleHandle(handle))
    }
}
