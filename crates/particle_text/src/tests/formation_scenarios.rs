//! Scatter-then-form scenarios for the all-at-once variant

use crate::config::ParticleTextConfig;
use crate::input::RepulsionContext;
use crate::physics::FormationPhase;
use crate::render::HeadlessScene;
use crate::text::TextRasterizer;
use crate::ParticleTextSystem;

const FRAME: f32 = 1.0 / 60.0;

fn square_a() -> ParticleTextConfig {
    let mut config = ParticleTextConfig::new("A").with_seed(42).with_scale(1.0);
    config.raster.canvas_width = 256;
    config.raster.canvas_height = 256;
    config.raster.sample_stride = 3;
    config
}

/// Count ink pixels with a plain nested loop over the canvas
fn scan_count(config: &ParticleTextConfig) -> usize {
    let raster = TextRasterizer::with_block_font().rasterize(
        &config.text,
        config.raster.font_size_px,
        config.raster.canvas_width,
        config.raster.canvas_height,
    );
    let canvas = raster.canvas();
    let stride = config.raster.sample_stride as usize;
    let mut count = 0;
    for y in (0..canvas.height()).step_by(stride) {
        for x in (0..canvas.width()).step_by(stride) {
            if canvas.alpha_at(x, y) > config.raster.alpha_threshold {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_point_count_matches_raster_scan() {
    let config = square_a();
    let expected = scan_count(&config);

    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = system.create(config, &mut scene).unwrap();

    let points = system.point_set(handle).unwrap();
    assert!(expected > 0 && expected < 2000);
    assert_eq!(points.len(), expected);
    assert!(points.particles().iter().all(|p| p.glyph == 0));
}

#[test]
fn test_first_update_moves_every_point() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = system.create(square_a(), &mut scene).unwrap();

    let before: Vec<_> = system.point_set(handle).unwrap().particles().iter().map(|p| p.current).collect();
    system.update(handle, &RepulsionContext::inactive(), FRAME, &mut scene).unwrap();
    let after = system.point_set(handle).unwrap().particles();

    for (old, particle) in before.iter().zip(after) {
        assert_ne!(*old, particle.current);
        assert!(particle.current.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn test_formation_converges_without_pointer() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = system.create(square_a(), &mut scene).unwrap();

    let scattered = system.point_set(handle).unwrap().max_home_distance();
    for _ in 0..1000 {
        system.update(handle, &RepulsionContext::inactive(), FRAME, &mut scene).unwrap();
    }

    assert!(scattered > 1.0);
    assert!(system.point_set(handle).unwrap().max_home_distance() < 0.5);
    assert_eq!(system.phase(handle), Some(FormationPhase::Settled));
}

#[test]
fn test_progress_never_decreases() {
    let mut system = ParticleTextSystem::new();
    let mut scene = HeadlessScene::new();
    let handle = system.create(square_a(), &mut scene).unwrap();

    let mut last = system.formation(handle).unwrap().progress();
    for dt in [FRAME, -FRAME, 0.0, 0.5, FRAME, 3.0] {
        system.update(handle, &RepulsionContext::inactive(), dt, &mut scene).unwrap();
        let progress = system.formation(handle).unwrap().progress();
        assert!(progress >= last);
        last = progress;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn test_same_seed_forms_identically() {
    let mut scene = HeadlessScene::new();
    let mut first = ParticleTextSystem::new();
    let mut second = ParticleTextSystem::new();
    let a = first.create(square_a(), &mut scene).unwrap();
    let b = second.create(square_a(), &mut scene).unwrap();

    for _ in 0..10 {
        first.update(a, &RepulsionContext::inactive(), FRAME, &mut scene).unwrap();
        second.update(b, &RepulsionContext::inactive(), FRAME, &mut scene).unwrap();
    }
    assert_eq!(
        first.point_set(a).unwrap().positions_flat(),
        second.point_set(b).unwrap().positions_flat()
    );
}
