//! Spring-repulsion integrator
//!
//! Every frame, for every active point, in this order:
//! 1. spring pull toward home, `(home - current) * k`
//! 2. pointer repulsion, once formation progress allows it
//! 3. damping, applied once after both forces
//! 4. `current += velocity`
//!
//! The step is a fixed per-frame update and is not scaled by frame time.
//! Points never interact with each other.

use crate::cloud::PointSet;
use crate::config::PhysicsConfig;
use crate::foundation::math::Vec3;
use crate::input::RepulsionContext;

/// Points closer to the pointer than this are left alone
const MIN_REPULSE_DISTANCE: f32 = 1.0;

/// Counters from one integrator step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Points advanced
    pub stepped: usize,
    /// Points that received a repulsion impulse
    pub repelled: usize,
}

/// Repulsion impulse for a point at `offset` from the pointer
///
/// Falls off linearly from `strength` at the pointer to zero at `radius`.
/// Returns `None` outside `(1, radius)`; the lower bound keeps points sitting
/// on the pointer from dividing by a vanishing distance.
pub fn repulsion_impulse(offset: Vec3, radius: f32, strength: f32) -> Option<Vec3> {
    let distance = offset.norm();
    if distance > MIN_REPULSE_DISTANCE && distance < radius {
        Some(offset / distance * strength * (1.0 - distance / radius))
    } else {
        None
    }
}

/// Per-frame physics step shared by every particle text variant
#[derive(Debug, Clone, PartialEq)]
pub struct SpringRepulsionIntegrator {
    base_spring: f32,
    extra_spring: f32,
    damping: f32,
    repulse_radius: f32,
    repulse_strength: f32,
    repulse_after_progress: f32,
}

impl SpringRepulsionIntegrator {
    /// Create an integrator from physics constants
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            base_spring: config.base_spring,
            extra_spring: config.extra_spring,
            damping: config.damping,
            repulse_radius: config.repulse_radius,
            repulse_strength: config.repulse_strength,
            repulse_after_progress: config.repulse_after_progress,
        }
    }

    /// Spring constant at a formation progress
    ///
    /// Starts at `base + extra` and relaxes to exactly `base` at progress 1.
    pub fn spring_constant(&self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        self.base_spring + self.extra_spring * (1.0 - progress)
    }

    /// Whether repulsion applies at this progress and context
    pub fn repulsion_enabled(&self, progress: f32, context: &RepulsionContext) -> bool {
        context.active && progress > self.repulse_after_progress
    }

    /// Advance every active point by one frame
    pub fn step(&self, points: &mut PointSet, context: &RepulsionContext, progress: f32) -> StepStats {
        let spring = self.spring_constant(progress);
        let repulse = self.repulsion_enabled(progress, context);
        let mut stats = StepStats::default();

        for particle in points.particles_mut().iter_mut().filter(|p| p.active) {
            particle.velocity += (particle.home - particle.current) * spring;

            if repulse {
                let offset = particle.current - context.pointer_world;
                if let Some(impulse) = repulsion_impulse(offset, self.repulse_radius, self.repulse_strength) {
                    particle.velocity += impulse;
                    stats.repelled += 1;
                }
            }

            particle.velocity *= self.damping;
            particle.current += particle.velocity;
            stats.stepped += 1;
        }

        log::trace!(
            "Integrator step: k={:.4} stepped={} repelled={}",
            spring, stats.stepped, stats.repelled
        );
        stats
    }
}
