//! Scene graph collaborator for point cloud objects

use std::collections::HashMap;

/// Identifier of a renderable point cloud inside the host scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneObjectId(pub u64);

/// What the host renderer must offer to display particle text
pub trait PointCloudScene {
    /// Create a renderable point cloud sized for `point_count` points
    fn create_point_cloud(&mut self, label: &str, point_count: usize) -> SceneObjectId;

    /// Replace the cloud's buffers with the latest frame
    ///
    /// `positions` holds `x, y, z` triples; `sizes` and `alphas` hold one
    /// value per point.
    fn upload(&mut self, id: SceneObjectId, positions: &[f32], sizes: &[f32], alphas: &[f32]);

    /// Remove the cloud and release its buffers
    fn remove_point_cloud(&mut self, id: SceneObjectId);
}

/// Last buffers uploaded to one cloud of a [`HeadlessScene`]
#[derive(Debug, Clone, Default)]
pub struct UploadedCloud {
    /// Label given at creation
    pub label: String,
    /// Flat positions from the last upload
    pub positions: Vec<f32>,
    /// Sizes from the last upload
    pub sizes: Vec<f32>,
    /// Opacities from the last upload
    pub alphas: Vec<f32>,
    /// Number of uploads received
    pub upload_count: u64,
}

/// Scene that records uploads instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessScene {
    clouds: HashMap<SceneObjectId, UploadedCloud>,
    next_id: u64,
}

impl HeadlessScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cloud
    pub fn cloud(&self, id: SceneObjectId) -> Option<&UploadedCloud> {
        self.clouds.get(&id)
    }

    /// Number of live clouds
    pub fn cloud_count(&self) -> usize {
        self.clouds.len()
    }
}

impl PointCloudScene for HeadlessScene {
    fn create_point_cloud(&mut self, label: &str, point_count: usize) -> SceneObjectId {
        let id = SceneObjectId(self.next_id);
        self.next_id += 1;
        self.clouds.insert(
            id,
            UploadedCloud {
                label: label.to_string(),
                positions: Vec::with_capacity(point_count * 3),
                ..Default::default()
            },
        );
        log::debug!("Headless scene created cloud {:?} '{}' ({} points)", id, label, point_count);
        id
    }

    fn upload(&mut self, id: SceneObjectId, positions: &[f32], sizes: &[f32], alphas: &[f32]) {
        let Some(cloud) = self.clouds.get_mut(&id) else {
            log::warn!("Upload to unknown cloud {:?} ignored", id);
            return;
        };
        cloud.positions.clear();
        cloud.positions.extend_from_slice(positions);
        cloud.sizes.clear();
        cloud.sizes.extend_from_slice(sizes);
        cloud.alphas.clear();
        cloud.alphas.extend_from_slice(alphas);
        cloud.upload_count += 1;
    }

    fn remove_point_cloud(&mut self, id: SceneObjectId) {
        if self.clouds.remove(&id).is_none() {
            log::warn!("Removal of unknown cloud {:?} ignored", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_scene_records_uploads() {
        let mut scene = HeadlessScene::new();
        let id = scene.create_point_cloud("title", 1);
        scene.upload(id, &[1.0, 2.0, 3.0], &[0.5], &[1.0]);
        scene.upload(id, &[4.0, 5.0, 6.0], &[0.5], &[0.25]);

        let cloud = scene.cloud(id).unwrap();
        assert_eq!(cloud.label, "title");
        assert_eq!(cloud.positions, vec![4.0, 5.0, 6.0]);
        assert_eq!(cloud.alphas, vec![0.25]);
        assert_eq!(cloud.upload_count, 2);

        scene.remove_point_cloud(id);
        assert_eq!(scene.cloud_count(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut scene = HeadlessScene::new();
        let a = scene.create_point_cloud("a", 0);
        scene.remove_point_cloud(a);
        let b = scene.create_point_cloud("b", 0);
        assert_ne!(a, b);
    }
}
