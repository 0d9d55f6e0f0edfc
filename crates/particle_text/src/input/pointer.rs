//! Pointer tracking, projection and the per-frame repulsion context

use crate::foundation::math::{utils, Vec2, Vec3};
use crate::render::Camera;

/// Pointer position as reported by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    ndc: Vec2,
    entered: bool,
    over_viewport: bool,
}

impl PointerState {
    /// A pointer that has not entered the viewport yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move in normalized device coordinates
    pub fn move_to(&mut self, ndc_x: f32, ndc_y: f32) {
        self.ndc = Vec2::new(utils::clamp(ndc_x, -1.0, 1.0), utils::clamp(ndc_y, -1.0, 1.0));
        self.entered = true;
        self.over_viewport = true;
    }

    /// Record a pointer move in window pixels (origin top-left, y down)
    pub fn move_to_pixels(&mut self, x: f32, y: f32, viewport_width: f32, viewport_height: f32) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        self.move_to(x / viewport_width * 2.0 - 1.0, 1.0 - y / viewport_height * 2.0);
    }

    /// Record the pointer leaving the viewport
    pub fn leave(&mut self) {
        self.over_viewport = false;
    }

    /// Last known position in NDC
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Whether the pointer has entered the viewport at least once
    pub fn has_entered(&self) -> bool {
        self.entered
    }

    /// Whether the pointer is over the viewport right now
    pub fn is_over_viewport(&self) -> bool {
        self.over_viewport
    }
}

/// Pointer-derived repulsion centre for one frame
///
/// Recomputed every frame and only read by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionContext {
    /// Pointer position on the projection plane
    pub pointer_world: Vec3,
    /// Whether repulsion applies this frame
    pub active: bool,
}

impl RepulsionContext {
    /// No repulsion this frame
    pub fn inactive() -> Self {
        Self {
            pointer_world: Vec3::zeros(),
            active: false,
        }
    }

    /// Repulsion centred at `pointer_world`
    pub fn at(pointer_world: Vec3) -> Self {
        Self {
            pointer_world,
            active: true,
        }
    }
}

impl Default for RepulsionContext {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Casts the pointer onto a plane a fixed distance in front of the camera
#[derive(Debug, Clone, Copy)]
pub struct PointerProjector {
    plane_distance: f32,
}

impl PointerProjector {
    /// Project onto the plane `plane_distance` units along the view axis
    pub fn new(plane_distance: f32) -> Self {
        Self { plane_distance }
    }

    /// Distance of the projection plane from the camera
    pub fn plane_distance(&self) -> f32 {
        self.plane_distance
    }

    /// World position under the pointer, or `None` before the pointer has
    /// ever entered the viewport
    pub fn project(&self, pointer: &PointerState, camera: &Camera) -> Option<Vec3> {
        if !pointer.has_entered() {
            return None;
        }
        let forward = camera.forward();
        if !utils::is_finite(&forward) {
            return None;
        }
        let ndc = pointer.ndc();
        let ray = camera.screen_to_world_ray(ndc.x, ndc.y)?;
        let plane_point = camera.position + forward * self.plane_distance;
        ray.intersect_plane(plane_point, forward)
    }

    /// Build this frame's repulsion context
    pub fn context(&self, pointer: &PointerState, camera: &Camera) -> RepulsionContext {
        if !pointer.is_over_viewport() {
            return RepulsionContext::inactive();
        }
        self.project(pointer, camera)
            .map_or_else(RepulsionContext::inactive, RepulsionContext::at)
    }
}
