//! Pointer projection and repulsion on settled text

use approx::assert_relative_eq;

use crate::config::ParticleTextConfig;
use crate::foundation::math::Vec3;
use crate::input::{PointerProjector, PointerState, RepulsionContext};
use crate::render::{Camera, HeadlessScene};
use crate::{ParticleTextHandle, ParticleTextSystem};

const FRAME: f32 = 1.0 / 60.0;

fn settled(system: &mut ParticleTextSystem, scene: &mut HeadlessScene) -> ParticleTextHandle {
    let mut config = ParticleTextConfig::new("I").with_seed(3);
    config.formation_duration_ms = 500.0;
    let handle = system.create(config, scene).unwrap();
    for _ in 0..600 {
        system.update(handle, &RepulsionContext::inactive(), FRAME, scene).unwrap();
    }
    handle
}

#[test]
fn test_pointer_centre_projects_to_origin() {
    let camera = Camera::default();
    let projector = PointerProjector::new(120.0);
    let mut pointer = PointerState::new();

    assert!(!projector.context(&pointer, &camera).active);

    pointer.move_to(0.0, 0.0);
    let context = projector.context(&pointer, &camera);
    assert!(context.active);
    assert_relative_eq!(context.pointer_world, Vec3::zeros(), epsilon = 1e-3);
}

#[test]
fn test_pointer_pushes_nearby_points_away() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = settled(&mut system, &mut scene);

    let home = system.point_set(handle).unwrap().particles()[0].home;
    let pointer_world = home + Vec3::new(-3.0, 0.0, 0.0);
    let context = RepulsionContext::at(pointer_world);

    let stats = system.update(handle, &context, FRAME, &mut scene).unwrap();
    assert!(stats.repelled > 0);

    let particle = &system.point_set(handle).unwrap().particles()[0];
    assert!((particle.current - pointer_world).norm() > 3.0);
    assert!(particle.current.x > home.x);
}

#[test]
fn test_points_return_after_pointer_leaves() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = settled(&mut system, &mut scene);

    let context = RepulsionContext::at(Vec3::new(0.0, 0.0, 2.0));
    for _ in 0..30 {
        system.update(handle, &context, FRAME, &mut scene).unwrap();
    }
    assert!(system.point_set(handle).unwrap().max_home_distance() > 0.5);

    for _ in 0..500 {
        system.update(handle, &RepulsionContext::inactive(), FRAME, &mut scene).unwrap();
    }
    assert!(system.point_set(handle).unwrap().max_home_distance() < 0.5);
}

#[test]
fn test_no_repulsion_early_in_formation() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = system.create(ParticleTextConfig::new("I").with_seed(3), &mut scene).unwrap();

    let stats = system.update(handle, &RepulsionContext::at(Vec3::zeros()), FRAME, &mut scene).unwrap();
    assert_eq!(stats.repelled, 0);
    assert!(stats.stepped > 0);
}
