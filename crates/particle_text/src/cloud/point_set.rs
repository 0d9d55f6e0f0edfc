//! Point storage for one particle text instance

use crate::foundation::math::Vec3;

/// One point of a formed text
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Target position; fixed after creation
    pub home: Vec3,
    /// Live position
    pub current: Vec3,
    /// Per-step velocity
    pub velocity: Vec3,
    /// Character the point was sampled from
    pub glyph: usize,
    /// Reveal rank for the sequential scheduler
    pub spawn_order: Option<u32>,
    /// Whether the integrator moves this point
    pub active: bool,
    /// Rendered size
    pub size: f32,
    /// Rendered opacity
    pub alpha: f32,
    /// Phase offset of the settled pulse, in radians
    pub pulse_phase: f32,
}

impl Particle {
    /// Create a visible, resting point at `home`
    pub fn at_home(home: Vec3, glyph: usize, size: f32) -> Self {
        Self {
            home,
            current: home,
            velocity: Vec3::zeros(),
            glyph,
            spawn_order: None,
            active: true,
            size,
            alpha: 1.0,
            pulse_phase: 0.0,
        }
    }

    /// Distance from the live position to home
    pub fn distance_to_home(&self) -> f32 {
        (self.home - self.current).norm()
    }

    /// Hide the point and take it out of the simulation
    pub fn deactivate(&mut self) {
        self.active = false;
        self.velocity = Vec3::zeros();
        self.size = 0.0;
        self.alpha = 0.0;
    }
}

/// Ordered set of points plus the flat buffers bound to the renderer
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    particles: Vec<Particle>,
    position_buffer: Vec<[f32; 3]>,
    size_buffer: Vec<f32>,
    alpha_buffer: Vec<f32>,
}

impl PointSet {
    /// Create a point set and fill its buffers
    pub fn new(particles: Vec<Particle>) -> Self {
        let mut set = Self {
            particles,
            ..Default::default()
        };
        set.sync_buffers();
        set
    }

    /// An empty set; every operation on it is a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the set holds no points
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// All points
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// All points, mutably
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of points the integrator currently moves
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// Largest distance of any point from its home
    pub fn max_home_distance(&self) -> f32 {
        self.particles
            .iter()
            .map(Particle::distance_to_home)
            .fold(0.0, f32::max)
    }

    /// Copy live positions and visuals into the render buffers
    pub fn sync_buffers(&mut self) {
        self.position_buffer.clear();
        self.size_buffer.clear();
        self.alpha_buffer.clear();
        for particle in &self.particles {
            let p = &particle.current;
            self.position_buffer.push([p.x, p.y, p.z]);
            self.size_buffer.push(particle.size);
            self.alpha_buffer.push(particle.alpha);
        }
    }

    /// Live positions as `x, y, z` triples in one flat slice
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.position_buffer)
    }

    /// Per-point sizes, aligned with [`Self::positions_flat`]
    pub fn sizes(&self) -> &[f32] {
        &self.size_buffer
    }

    /// Per-point opacities, aligned with [`Self::positions_flat`]
    pub fn alphas(&self) -> &[f32] {
        &self.alpha_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_follow_particles() {
        let mut set = PointSet::new(vec![
            Particle::at_home(Vec3::new(1.0, 2.0, 3.0), 0, 0.5),
            Particle::at_home(Vec3::new(-1.0, 0.0, 4.0), 1, 0.5),
        ]);
        assert_eq!(set.positions_flat(), &[1.0, 2.0, 3.0, -1.0, 0.0, 4.0]);

        set.particles_mut()[1].current = Vec3::new(9.0, 8.0, 7.0);
        set.particles_mut()[1].deactivate();
        set.sync_buffers();

        assert_eq!(&set.positions_flat()[3..], &[9.0, 8.0, 7.0]);
        assert_eq!(set.sizes(), &[0.5, 0.0]);
        assert_eq!(set.alphas(), &[1.0, 0.0]);
        assert_eq!(set.active_count(), 1);
    }

    #[test]
    fn test_empty_set_is_harmless() {
        let mut set = PointSet::empty();
        set.sync_buffers();
        assert!(set.is_empty());
        assert!(set.positions_flat().is_empty());
        assert_eq!(set.max_home_distance(), 0.0);
    }
}
