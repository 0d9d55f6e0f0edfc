//! Ink pixel to home position mapping

use serde::{Deserialize, Serialize};

use super::{Particle, PointSet};
use crate::config::ParticleTextConfig;
use crate::foundation::math::Vec3;
use crate::text::InkPixel;

/// How the text plane is placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Upright, facing +Z: `(x, y, depth)`
    #[default]
    Billboard,
    /// Lying flat, top of the text pointing to -Z: `(x, depth, -y)`
    GroundPlane,
}

/// Builds a [`PointSet`] from ink pixels
#[derive(Debug, Clone)]
pub struct PointCloudBuilder {
    scale: f32,
    offset: Vec3,
    depth: f32,
    orientation: Orientation,
    point_size: f32,
    spawn_order: bool,
}

impl PointCloudBuilder {
    /// Create a builder with unit scale at the origin
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset: Vec3::zeros(),
            depth: 0.0,
            orientation: Orientation::Billboard,
            point_size: 1.0,
            spawn_order: false,
        }
    }

    /// Create a builder from a particle text configuration
    pub fn from_config(config: &ParticleTextConfig) -> Self {
        Self {
            scale: config.scale,
            offset: config.offset_vec(),
            depth: config.depth,
            orientation: config.orientation,
            point_size: config.point_size,
            spawn_order: config.sequential.is_some(),
        }
    }

    /// Set world units per pixel
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the world offset
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set the text plane depth
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the plane orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Assign reveal ranks grouped by glyph
    pub fn with_spawn_order(mut self, enabled: bool) -> Self {
        self.spawn_order = enabled;
        self
    }

    /// Home position of one ink pixel
    pub fn home_for(&self, pixel: &InkPixel) -> Vec3 {
        let u = pixel.x * self.scale;
        let v = pixel.y * self.scale;
        let local = match self.orientation {
            Orientation::Billboard => Vec3::new(u, v, self.depth),
            Orientation::GroundPlane => Vec3::new(u, self.depth, -v),
        };
        local + self.offset
    }

    /// Map every pixel to one point, in input order
    pub fn build(&self, pixels: impl IntoIterator<Item = InkPixel>) -> PointSet {
        let mut particles: Vec<Particle> = pixels
            .into_iter()
            .map(|pixel| Particle::at_home(self.home_for(&pixel), pixel.glyph, self.point_size))
            .collect();

        if self.spawn_order {
            assign_spawn_order(&mut particles);
        }

        PointSet::new(particles)
    }
}

impl Default for PointCloudBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank points by glyph, keeping scan order inside each glyph
fn assign_spawn_order(particles: &mut [Particle]) {
    let mut indices: Vec<usize> = (0..particles.len()).collect();
    indices.sort_by_key(|&i| particles[i].glyph);
    for (rank, index) in indices.into_iter().enumerate() {
        particles[index].spawn_order = u32::try_from(rank).ok();
    }
}
