//! A small CPU particle fountain.
//!
//! Emits particles upward from the emitter origin with a random spread, pulls
//! them down with gravity and shrinks them over their lifetime. Particles are
//! simulated in the emitter's local space.

use glam::{Affine3A, Vec3};
use mote_pool::{Particle, ParticleSource};

/// Downward acceleration in units per second squared.
const GRAVITY: f32 = -9.8;

/// Fraction of start size a particle keeps at the end of its life.
const END_SIZE_FACTOR: f32 = 0.25;

/// Fountain emitter settings.
#[derive(Debug, Clone)]
pub struct FountainSettings {
    /// Hard cap on live particles
    pub max_particles: usize,
    /// Particles emitted per second
    pub emission_rate: f32,
    /// Seconds each particle lives
    pub lifetime: f32,
    /// Initial particle size
    pub start_size: f32,
    /// Initial upward speed
    pub launch_speed: f32,
    /// Maximum sideways speed
    pub spread: f32,
}

impl Default for FountainSettings {
    fn default() -> Self {
        Self {
            max_particles: 512,
            emission_rate: 120.0,
            lifetime: 2.5,
            start_size: 0.6,
            launch_speed: 9.0,
            spread: 2.5,
        }
    }
}

/// Particle fountain implementing [`ParticleSource`].
#[derive(Debug)]
pub struct Fountain {
    settings: FountainSettings,
    particles: Vec<Particle>,
    transform: Affine3A,
    emit_accumulator: f32,
    rng: fastrand::Rng,
}

impl Fountain {
    /// Creates a fountain at `transform` with a fixed RNG seed.
    #[must_use]
    pub fn new(settings: FountainSettings, transform: Affine3A, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(settings.max_particles),
            settings,
            transform,
            emit_accumulator: 0.0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Number of live particles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.remaining_lifetime -= dt;
            particle.velocity.y += GRAVITY * dt;
            particle.position += particle.velocity * dt;
        }
        self.particles.retain(|p| p.remaining_lifetime > 0.0);

        self.emit_accumulator += self.settings.emission_rate * dt;
        while self.emit_accumulator >= 1.0 {
            self.emit_accumulator -= 1.0;
            if self.particles.len() >= self.settings.max_particles {
                continue;
            }
            let sideways = (self.rng.f32() * 2.0 - 1.0) * self.settings.spread;
            let upward = self.settings.launch_speed * (0.8 + 0.4 * self.rng.f32());
            self.particles.push(Particle {
                position: Vec3::ZERO,
                velocity: Vec3::new(sideways, upward, 0.0),
                start_size: self.settings.start_size,
                remaining_lifetime: self.settings.lifetime,
                start_lifetime: self.settings.lifetime,
            });
        }
    }
}

impl ParticleSource for Fountain {
    fn max_particles(&self) -> usize {
        self.settings.max_particles
    }

    fn get_particles(&self, buffer: &mut [Particle]) -> usize {
        let count = self.particles.len().min(buffer.len());
        buffer[..count].copy_from_slice(&self.particles[..count]);
        count
    }

    fn current_size(&self, particle: &Particle) -> f32 {
        let shrink = 1.0 - (1.0 - END_SIZE_FACTOR) * particle.age_fraction();
        particle.start_size * shrink
    }

    fn local_to_world(&self) -> Affine3A {
        self.transform
    }
}
