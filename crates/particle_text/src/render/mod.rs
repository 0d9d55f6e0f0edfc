//! Rendering collaborators
//!
//! The crate never draws anything itself. It reads a [`Camera`] to place the
//! pointer in the world and hands live buffers to a [`PointCloudScene`]
//! implemented by whatever renderer hosts the scene.

pub mod camera;
pub mod scene;

pub use camera::{Camera, Ray};
pub use scene::{HeadlessScene, PointCloudScene, SceneObjectId, UploadedCloud};
