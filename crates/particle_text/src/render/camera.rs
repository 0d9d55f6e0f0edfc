//! # 3D Camera
//!
//! Perspective camera used to turn a 2D pointer into a world-space ray.
//!
//! ## Coordinate System
//! Right-handed, Y-up world space. Normalized device coordinates run from -1
//! to 1 with +X right and +Y up; NDC depth runs from -1 (near) to 1 (far).

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3, Vec4};

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with the plane through `point` with normal `normal`
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane lies
    /// behind the origin.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<Vec3> {
        let denom = self.direction.dot(&normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (point - self.origin).dot(&normal) / denom;
        (t >= 0.0).then(|| self.point_at(t))
    }
}

/// 3D perspective camera
///
/// Matrices are computed on demand, since the camera may move every frame.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep resize storms quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Camera-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `P × V` matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Convert an NDC pointer position to a world-space ray
    ///
    /// Unprojects the pointer at the near and far planes through the inverse
    /// view-projection matrix. Returns `None` for a degenerate camera whose
    /// matrix cannot be inverted.
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inv_view_proj = self.view_projection_matrix().try_inverse()?;

        let unproject = |z: f32| {
            let h = inv_view_proj * Vec4::new(ndc_x, ndc_y, z, 1.0);
            (h.w.abs() > f32::EPSILON).then(|| h.xyz() / h.w)
        };
        let world_near = unproject(-1.0)?;
        let world_far = unproject(1.0)?;

        let direction = world_far - world_near;
        if direction.norm_squared() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(self.position, direction))
    }
}

impl Default for Camera {
    /// Camera 120 units in front of the origin with a 60 degree field of view
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 0.0, 120.0), 60.0, 16.0 / 9.0, 0.1, 2000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::default();
        let ray = camera.screen_to_world_ray(0.0, 0.0).unwrap();
        assert_relative_eq!(ray.origin, camera.position);
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-3);
    }

    #[test]
    fn test_corner_ray_matches_field_of_view() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 90.0, 2.0, 0.1, 100.0);
        let ray = camera.screen_to_world_ray(1.0, 1.0).unwrap();
        // tan(45deg) = 1, so one unit forward spans aspect units right and one up
        let expected = Vec3::new(2.0, 1.0, -1.0).normalize();
        assert_relative_eq!(ray.direction, expected, epsilon = 1e-3);
    }

    #[test]
    fn test_aspect_change_widens_edge_ray() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 90.0, 1.0, 0.1, 100.0);
        let square = camera.screen_to_world_ray(1.0, 0.0).unwrap().point_at(10.0);

        camera.set_aspect_ratio(2.0);
        let wide = camera.screen_to_world_ray(1.0, 0.0).unwrap();
        let hit = wide.intersect_plane(Vec3::zeros(), Vec3::z()).unwrap();

        assert_relative_eq!(camera.aspect, 2.0);
        assert_relative_eq!(hit, Vec3::new(20.0, 0.0, 0.0), epsilon = 1e-2);
        assert!(square.x < hit.x);
    }

        #[test]
    fn test_ray_plane_intersection() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_plane(Vec3::zeros(), Vec3::z()).unwrap();
        assert_relative_eq!(hit, Vec3::zeros());

        let parallel = Ray::new(Vec3::zeros(), Vec3::x());
        assert!(parallel.intersect_plane(Vec3::new(0.0, 0.0, -5.0), Vec3::z()).is_none());

        let behind = Ray::new(Vec3::zeros(), Vec3::z());
        assert!(behind.intersect_plane(Vec3::new(0.0, 0.0, -5.0), Vec3::z()).is_none());
    }

    #[test]
    fn test_degenerate_camera_has_no_ray() {
        let mut camera = Camera::default();
        camera.set_target(camera.position);
        assert!(camera.screen_to_world_ray(0.0, 0.0).is_none());
    }
}
