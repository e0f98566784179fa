//! Particle simulation interface.
//!
//! The pool never simulates particles itself. It reads them through
//! [`ParticleSource`], which a host engine implements on top of its own
//! particle system.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// One particle record as reported by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    /// Position in the simulation's space
    pub position: Vec3,
    /// Velocity in the simulation's space
    pub velocity: Vec3,
    /// Size at spawn
    pub start_size: f32,
    /// Seconds left before the particle dies
    pub remaining_lifetime: f32,
    /// Total lifetime at spawn
    pub start_lifetime: f32,
}

impl Particle {
    /// Creates a particle at `position` with the given start size.
    #[must_use]
    pub fn new(position: Vec3, start_size: f32) -> Self {
        Self {
            position,
            start_size,
            ..Self::default()
        }
    }

    /// Normalized age (0.0 at spawn, 1.0 at death).
    #[must_use]
    pub fn age_fraction(&self) -> f32 {
        if self.start_lifetime <= 0.0 {
            0.0
        } else {
            (1.0 - self.remaining_lifetime / self.start_lifetime).clamp(0.0, 1.0)
        }
    }
}

/// Read access to a running particle simulation.
pub trait ParticleSource {
    /// Maximum number of particles the simulation can hold at once.
    fn max_particles(&self) -> usize;

    /// Copies live particles into `buffer` and returns how many were written.
    fn get_particles(&self, buffer: &mut [Particle]) -> usize;

    /// Current rendered size of `particle`.
    fn current_size(&self, particle: &Particle) -> f32;

    /// Transform from the simulation's local space to world space.
    fn local_to_world(&self) -> Affine3A;
}

/// In-memory particle source for tests and embedding.
#[derive(Debug, Clone)]
pub struct MockParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    transform: Affine3A,
    size_scale: f32,
}

impl MockParticleSystem {
    /// Creates an empty system with room for `max_particles`.
    #[must_use]
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
            transform: Affine3A::IDENTITY,
            size_scale: 1.0,
        }
    }

    /// Replaces the live particles, truncating to capacity.
    pub fn set_particles(&mut self, mut particles: Vec<Particle>) {
        particles.truncate(self.max_particles);
        self.particles = particles;
    }

    /// Fills the system with `count` particles laid out along the X axis,
    /// particle `i` at `(i, 0, 0)` with size `size`.
    pub fn fill_line(&mut self, count: usize, size: f32) {
        let particles = (0..count)
            .map(|i| Particle::new(Vec3::new(i as f32, 0.0, 0.0), size))
            .collect();
        self.set_particles(particles);
    }

    /// Sets the local-to-world transform.
    pub fn set_transform(&mut self, transform: Affine3A) {
        self.transform = transform;
    }

    /// Sets the factor applied to start size to get current size.
    pub fn set_size_scale(&mut self, scale: f32) {
        self.size_scale = scale;
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if no particles are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl ParticleSource for MockParticleSystem {
    fn max_particles(&self) -> usize {
        self.max_particles
    }

    fn get_particles(&self, buffer: &mut [Particle]) -> usize {
        let count = self.particles.len().min(buffer.len());
        buffer[..count].copy_from_slice(&self.particles[..count]);
        count
    }

    fn current_size(&self, particle: &Particle) -> f32 {
        particle.start_size * self.size_scale
    }

    fn local_to_world(&self) -> Affine3A {
        self.transform
    }
}
