//! Collider pool manager.
//!
//! Each fixed step the manager snapshots the particle simulation into a
//! buffer allocated once at start, sizes the active part of the pool to
//! `ceil(count / skip_rate)` and writes one sampled particle's position and
//! size into each active proxy.
//!
//! Surplus proxies are deactivated, never destroyed, unless the configured
//! [`RetentionPolicy`] says otherwise. Destruction always goes through the
//! proxy's lifecycle guard.

use mote_common::{EntityId, PoolError, PoolResult, ProxyHandle};
use tracing::{debug, error, info, trace};

use crate::arena::ProxyArena;
use crate::config::{ColliderConfig, RetentionPolicy};
use crate::proxy::ColliderProxy;
use crate::source::{Particle, ParticleSource};

/// Run state of a pool manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerState {
    /// Created, waiting for `start`
    #[default]
    Idle,
    /// Bound to a simulation and reconciling every step
    Running,
    /// Started without a simulation; does nothing for the rest of its life
    Inert,
    /// Shut down; every proxy has been destroyed
    Stopped,
}

/// What one fixed step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// False when the manager was not running and skipped the step
    pub performed: bool,
    /// Steps performed so far, including this one
    pub step: u64,
    /// Live particles reported by the simulation
    pub particle_count: usize,
    /// Proxies needed for the sampled particles
    pub required: usize,
    /// Proxies active after the step
    pub active: usize,
    /// Pool length after the step
    pub pool_len: usize,
    /// Proxies created this step
    pub created: usize,
    /// Proxies destroyed by the retention policy this step
    pub expired: usize,
}

/// Keeps a pool of circle colliders in lockstep with a particle simulation.
#[derive(Debug)]
pub struct ColliderPoolManager {
    config: ColliderConfig,
    /// Entity spawned proxies are parented to
    owner: EntityId,
    pool: ProxyArena,
    /// Reused particle buffer, sized once at start
    snapshot: Vec<Particle>,
    state: ManagerState,
    steps: u64,
}

impl ColliderPoolManager {
    /// Creates a manager. Invalid configuration values are corrected and logged.
    #[must_use]
    pub fn new(mut config: ColliderConfig) -> Self {
        config.validate();
        Self {
            config,
            owner: EntityId::new(),
            pool: ProxyArena::new(),
            snapshot: Vec::new(),
            state: ManagerState::Idle,
            steps: 0,
        }
    }

    /// Binds the target simulation and allocates the particle buffer.
    ///
    /// Without a target the manager reports a configuration error and becomes
    /// inert for good. Calling `start` again later does not revive it.
    pub fn start<S: ParticleSource + ?Sized>(&mut self, target: Option<&S>) -> PoolResult<()> {
        match self.state {
            ManagerState::Idle => {},
            ManagerState::Inert => return Err(PoolError::MissingSimulation),
            ManagerState::Running | ManagerState::Stopped => {
                debug!("Ignoring start in state {:?}", self.state);
                return Ok(());
            },
        }

        let Some(source) = target else {
            error!("No target particle simulation set; collider pool disabled");
            self.state = ManagerState::Inert;
            return Err(PoolError::MissingSimulation);
        };

        let max_particles = source.max_particles();
        self.snapshot = vec![Particle::default(); max_particles];
        self.state = ManagerState::Running;
        info!(
            "Collider pool started (max particles {max_particles}, skip rate {})",
            self.config.skip_rate
        );
        Ok(())
    }

    /// Runs one fixed step against `source`.
    ///
    /// Does nothing unless the manager is running.
    pub fn fixed_update<S: ParticleSource + ?Sized>(&mut self, source: &S) -> PoolResult<StepReport> {
        if self.state != ManagerState::Running {
            return Ok(StepReport {
                step: self.steps,
                pool_len: self.pool.len(),
                ..StepReport::default()
            });
        }

        let count = source.get_particles(&mut self.snapshot);
        self.steps += 1;
        self.reconcile(source, count)
    }

    /// Matches the pool to the first `count` snapshot entries.
    fn reconcile<S: ParticleSource + ?Sized>(
        &mut self,
        source: &S,
        count: usize,
    ) -> PoolResult<StepReport> {
        let stride = self.config.stride();
        let count = count.min(self.snapshot.len());
        let required = count.div_ceil(stride);

        let (created, expired) = self.adjust_pool_size(required)?;

        let space = self.config.space();
        let local_to_world = source.local_to_world();
        let multiplier = self.config.size_multiplier;
        let is_trigger = self.config.is_trigger;

        for (slot, particle) in self.snapshot[..count].iter().step_by(stride).enumerate() {
            // Only reachable if the pool shrank under us
            let Some(proxy) = self.pool.get_at_mut(slot) else {
                break;
            };
            proxy.set_position(space.to_world(&local_to_world, particle.position));
            proxy.set_radius(source.current_size(particle) * multiplier);
            proxy.set_trigger(is_trigger);
        }

        let report = StepReport {
            performed: true,
            step: self.steps,
            particle_count: count,
            required,
            active: required.min(self.pool.len()),
            pool_len: self.pool.len(),
            created,
            expired,
        };
        debug!(
            "Step {}: {} particles, {} active of {} pooled",
            report.step, report.particle_count, report.active, report.pool_len
        );
        Ok(report)
    }

    /// Grows the pool to `required`, activates slots `[0, required)` and
    /// deactivates the rest. Returns (created, expired).
    fn adjust_pool_size(&mut self, required: usize) -> PoolResult<(usize, usize)> {
        self.pool.tick_idle();

        let mut created = 0;
        while self.pool.len() < required {
            let handle = self.spawn_proxy()?;
            trace!("Spawned collider {handle}");
            created += 1;
        }
        if created > 0 {
            debug!("Collider pool grew by {created} to {}", self.pool.len());
        }

        for position in required..self.pool.len() {
            if let Some(handle) = self.pool.handle_at(position) {
                self.pool.set_active(handle, false)?;
            }
        }
        for position in 0..required {
            if let Some(handle) = self.pool.handle_at(position) {
                self.pool.set_active(handle, true)?;
            }
        }

        let expired = self.apply_retention()?;
        Ok((created, expired))
    }

    fn spawn_proxy(&mut self) -> PoolResult<ProxyHandle> {
        let parent = (!self.config.no_parent).then_some(self.owner);
        let proxy = ColliderProxy::new(self.config.tag.clone(), self.config.layer())
            .with_parent(parent)
            .with_stats(self.config.stats.clone());
        self.pool.insert(proxy)
    }

    fn apply_retention(&mut self) -> PoolResult<usize> {
        let RetentionPolicy::ExpireAfterIdleSteps(limit) = self.config.retention else {
            return Ok(0);
        };

        let expired = self.pool.idle_handles(limit);
        for &handle in &expired {
            self.pool.destroy(handle)?;
        }
        if !expired.is_empty() {
            info!(
                "Expired {} idle colliders, {} remain pooled",
                expired.len(),
                self.pool.len()
            );
        }
        Ok(expired.len())
    }

    /// Destroys one proxy on request from outside the pool.
    ///
    /// The pool shrinks by exactly one and `handle` goes stale. A later step
    /// creates a replacement if demand still needs it.
    pub fn destroy_proxy(&mut self, handle: ProxyHandle) -> PoolResult<ColliderProxy> {
        let proxy = self.pool.destroy(handle)?;
        debug!("Proxy {handle} destroyed externally, {} remain", self.pool.len());
        Ok(proxy)
    }

    /// Destroys every pooled proxy and stops the manager.
    ///
    /// Returns how many proxies were destroyed.
    pub fn shutdown(&mut self) -> usize {
        let destroyed = self.pool.destroy_all();
        self.state = ManagerState::Stopped;
        info!("Collider pool shut down, destroyed {destroyed} colliders");
        destroyed
    }

    /// Active proxies in pool order, for the physics step.
    pub fn active_colliders(&self) -> impl Iterator<Item = (ProxyHandle, &ColliderProxy)> + '_ {
        self.pool.iter_active()
    }

    /// The proxy pool.
    #[must_use]
    pub const fn pool(&self) -> &ProxyArena {
        &self.pool
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &ColliderConfig {
        &self.config
    }

    /// Entity that parented proxies point at.
    #[must_use]
    pub const fn owner(&self) -> EntityId {
        self.owner
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> ManagerState {
        self.state
    }

    /// Length of the reused particle buffer.
    #[must_use]
    pub fn snapshot_capacity(&self) -> usize {
        self.snapshot.len()
    }

    #[cfg(test)]
    fn snapshot_ptr(&self) -> *const Particle {
        self.snapshot.as_ptr()
    }
}
