//! Initial scatter of live positions inside a sphere

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::PointSet;
use crate::config::ParticleTextConfig;
use crate::foundation::math::{constants::TAU, Vec3};

/// What each point's scatter sphere is centred on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScatterCenter {
    /// The instance's configured world offset, shared by all points
    #[default]
    ConfigOffset,
    /// Each point's own home position
    Home,
}

/// Uniform random point inside a sphere of `radius` around the origin
///
/// The radius is drawn through a cube root so the volume is filled evenly
/// instead of bunching up at the centre.
pub fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Writes scattered starting positions into a point set
#[derive(Debug, Clone)]
pub struct ScatterInitializer {
    radius: f32,
    center: ScatterCenter,
    offset: Vec3,
}

impl ScatterInitializer {
    /// Scatter within `radius` around `center`
    pub fn new(radius: f32, center: ScatterCenter, offset: Vec3) -> Self {
        Self { radius, center, offset }
    }

    /// Create an initializer from a particle text configuration
    pub fn from_config(config: &ParticleTextConfig) -> Self {
        Self::new(config.scatter_radius, config.scatter_center, config.offset_vec())
    }

    /// Overwrite every live position and clear velocities
    pub fn scatter<R: Rng + ?Sized>(&self, points: &mut PointSet, rng: &mut R) {
        for particle in points.particles_mut() {
            let center = match self.center {
                ScatterCenter::ConfigOffset => self.offset,
                ScatterCenter::Home => particle.home,
            };
            particle.current = center + sample_in_sphere(rng, self.radius);
            particle.velocity = Vec3::zeros();
        }
        points.sync_buffers();
    }
}
