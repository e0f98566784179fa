//! End-to-end reconciliation scenarios against the mock particle system.

use glam::{Affine3A, Quat, Vec2, Vec3};
use mote_common::{LayerMask, ProxyState};
use mote_pool::{
    ColliderConfig, ColliderPoolManager, MockParticleSystem, Particle, ParticleSource,
};

fn started(config: ColliderConfig, system: &MockParticleSystem) -> ColliderPoolManager {
    let mut manager = ColliderPoolManager::new(config);
    manager.start(Some(system)).expect("start succeeds");
    manager
}

fn active_positions(manager: &ColliderPoolManager) -> Vec<Vec3> {
    manager
        .active_colliders()
        .map(|(_, proxy)| proxy.position())
        .collect()
}

#[test]
fn skip_rate_three_samples_every_third_particle() {
    let mut system = MockParticleSystem::new(32);
    system.fill_line(10, 1.0);
    let mut manager = started(
        ColliderConfig {
            skip_rate: 3,
            world_space: true,
            ..ColliderConfig::default()
        },
        &system,
    );

    let report = manager.fixed_update(&system).expect("step succeeds");
    assert_eq!(report.required, 4);
    assert_eq!(manager.pool().active_count(), 4);

    let xs: Vec<f32> = active_positions(&manager).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 3.0, 6.0, 9.0]);
}

#[test]
fn radius_is_size_times_multiplier() {
    let mut system = MockParticleSystem::new(4);
    system.set_particles(vec![Particle::new(Vec3::ZERO, 2.0)]);
    let mut manager = started(
        ColliderConfig {
            size_multiplier: 0.5,
            ..ColliderConfig::default()
        },
        &system,
    );

    manager.fixed_update(&system).expect("step succeeds");
    let (_, proxy) = manager.active_colliders().next().expect("one active proxy");
    assert_eq!(proxy.radius(), 1.0);
}

#[test]
fn local_space_positions_go_through_transform() {
    let transform = Affine3A::from_scale_rotation_translation(
        Vec3::ONE,
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::new(5.0, 5.0, 0.0),
    );
    let mut system = MockParticleSystem::new(4);
    system.set_particles(vec![
        Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0),
        Particle::new(Vec3::new(0.0, 2.0, 0.0), 1.0),
    ]);
    system.set_transform(transform);

    let mut local = started(ColliderConfig::default(), &system);
    local.fixed_update(&system).expect("step succeeds");
    let expected: Vec<Vec3> = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]
        .into_iter()
        .map(|p| system.local_to_world().transform_point3(p))
        .collect();
    assert_eq!(active_positions(&local), expected);

    let mut world = started(
        ColliderConfig {
            world_space: true,
            ..ColliderConfig::default()
        },
        &system,
    );
    world.fixed_update(&system).expect("step succeeds");
    assert_eq!(
        active_positions(&world),
        vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]
    );
}

#[test]
fn empty_step_deactivates_everything() {
    let mut system = MockParticleSystem::new(16);
    system.fill_line(7, 1.0);
    let mut manager = started(ColliderConfig::default(), &system);
    manager.fixed_update(&system).expect("step succeeds");
    assert_eq!(manager.pool().active_count(), 7);

    system.set_particles(Vec::new());
    let report = manager.fixed_update(&system).expect("step succeeds");

    assert_eq!(report.required, 0);
    assert_eq!(report.created, 0);
    assert_eq!(manager.pool().active_count(), 0);
    assert_eq!(manager.pool().len(), 7);
    assert!(manager
        .pool()
        .iter()
        .all(|(_, _, state)| state == ProxyState::Inactive));
}

#[test]
fn external_destroy_shrinks_pool_by_one() {
    let mut system = MockParticleSystem::new(16);
    system.fill_line(6, 1.0);
    let mut manager = started(ColliderConfig::default(), &system);
    manager.fixed_update(&system).expect("step succeeds");

    let victim = manager.pool().handle_at(2).expect("slot 2 exists");
    let before = manager.pool().len();
    let proxy = manager.destroy_proxy(victim).expect("destroy succeeds");

    assert_eq!(proxy.position().x, 2.0);
    assert_eq!(manager.pool().len(), before - 1);
    assert!(!manager.pool().contains(victim));
    assert!(!manager.pool().handles().contains(&victim));
    assert!(manager.active_colliders().all(|(handle, _)| handle != victim));
}

#[test]
fn pool_is_a_high_water_mark() {
    let mut system = MockParticleSystem::new(64);
    let mut manager = started(ColliderConfig::default(), &system);

    for count in [5, 20, 12, 40, 0, 33] {
        system.fill_line(count, 1.0);
        manager.fixed_update(&system).expect("step succeeds");
    }

    assert_eq!(manager.pool().len(), 40);
    assert_eq!(manager.pool().active_count(), 33);
}

#[test]
fn physics_can_query_active_colliders() {
    let mut system = MockParticleSystem::new(16);
    system.fill_line(10, 1.0);
    let mut manager = started(
        ColliderConfig {
            layer: 4,
            world_space: true,
            ..ColliderConfig::default()
        },
        &system,
    );
    manager.fixed_update(&system).expect("step succeeds");

    // Radius 0.5 circles at x = 0..10; query circle at x=4.6 touches 4 and 5
    let layer_four = LayerMask::from_bits(1 << 4);
    let hits: Vec<_> = manager
        .pool()
        .overlapping(Vec2::new(4.6, 0.0), 0.2, layer_four)
        .collect();
    assert_eq!(hits.len(), 2);

    let other_layer = LayerMask::from_bits(1 << 5);
    assert_eq!(
        manager
            .pool()
            .overlapping(Vec2::new(4.6, 0.0), 0.2, other_layer)
            .count(),
        0
    );
}
