//! Sequential formation scheduler
//!
//! Reveals points one at a time in spawn order (glyph by glyph) at a fixed
//! interval. Leftover time carries over between frames, so the number of
//! spawned points after `t` seconds is `floor(t / interval)` regardless of
//! frame rate. Once every point is out, sizes start a gentle pulse.

use rand::Rng;

use crate::cloud::{sample_in_sphere, PointSet};
use crate::config::SequentialConfig;
use crate::foundation::math::{constants::TAU, Vec3};

/// Point-by-point reveal for one point set
#[derive(Debug, Clone)]
pub struct SequentialScheduler {
    interval: f32,
    jitter: f32,
    rise: f32,
    pulse_amplitude: f32,
    pulse_speed: f32,
    point_size: f32,
    order: Vec<usize>,
    cursor: usize,
    accumulator: f32,
    pulse_time: f32,
}

impl SequentialScheduler {
    /// Hide every point of `points` and queue them in spawn order
    ///
    /// Points without a spawn rank queue after ranked ones, in index order.
    pub fn new<R: Rng + ?Sized>(
        config: &SequentialConfig,
        point_size: f32,
        points: &mut PointSet,
        rng: &mut R,
    ) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        let particles = points.particles_mut();
        order.sort_by_key(|&i| (particles[i].spawn_order.is_none(), particles[i].spawn_order, i));

        for particle in particles.iter_mut() {
            particle.deactivate();
            particle.pulse_phase = rng.gen::<f32>() * TAU;
        }
        points.sync_buffers();

        Self {
            interval: config.point_spawn_interval,
            jitter: config.spawn_jitter,
            rise: config.spawn_rise,
            pulse_amplitude: config.pulse_amplitude,
            pulse_speed: config.pulse_speed,
            point_size,
            order,
            cursor: 0,
            accumulator: 0.0,
            pulse_time: 0.0,
        }
    }

    /// Points revealed so far
    pub fn spawned(&self) -> usize {
        self.cursor
    }

    /// Total points to reveal
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// True once every point is revealed
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Fraction of points revealed, 1.0 for an empty set
    pub fn progress(&self) -> f32 {
        if self.order.is_empty() {
            1.0
        } else {
            self.cursor as f32 / self.order.len() as f32
        }
    }

    /// Reveal as many points as whole intervals have elapsed
    ///
    /// Returns the number of points revealed by this call. Non-positive and
    /// non-finite deltas reveal nothing and leave the accumulator untouched.
    pub fn advance<R: Rng + ?Sized>(&mut self, points: &mut PointSet, delta_time: f32, rng: &mut R) -> usize {
        if self.is_complete() || !(delta_time > 0.0 && delta_time.is_finite()) {
            return 0;
        }
        self.accumulator += delta_time;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let due = (self.accumulator / self.interval).floor() as usize;
        self.accumulator %= self.interval;

        let count = due.min(self.order.len() - self.cursor);
        let rise = Vec3::new(0.0, self.rise, 0.0);
        let particles = points.particles_mut();
        for &index in &self.order[self.cursor..self.cursor + count] {
            let particle = &mut particles[index];
            particle.current = particle.home + sample_in_sphere(rng, self.jitter) + rise;
            particle.velocity = Vec3::zeros();
            particle.active = true;
            particle.size = self.point_size;
            particle.alpha = 1.0;
        }
        self.cursor += count;

        if count > 0 && self.is_complete() {
            log::debug!("Sequential reveal finished: {} points", self.order.len());
        }
        count
    }

    /// Modulate sizes once the reveal is complete
    pub fn pulse(&mut self, points: &mut PointSet, delta_time: f32) {
        if !self.is_complete() {
            return;
        }
        self.pulse_time += delta_time.max(0.0);
        let angle = self.pulse_time * self.pulse_speed;
        for particle in points.particles_mut() {
            particle.size = self.point_size * (1.0 + self.pulse_amplitude * (angle + particle.pulse_phase).sin());
        }
    }
}
