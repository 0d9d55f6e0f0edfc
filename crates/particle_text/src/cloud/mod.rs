//! Point clouds built from ink pixels
//!
//! [`PointCloudBuilder`] maps sampled pixels to home positions,
//! [`ScatterInitializer`] throws the live positions into a sphere, and
//! [`PointSet`] owns the result together with the buffers a renderer reads.

pub mod point_set;
pub mod builder;
pub mod scatter;

pub use point_set::{Particle, PointSet};
pub use builder::{Orientation, PointCloudBuilder};
pub use scatter::{sample_in_sphere, ScatterCenter, ScatterInitializer};
