//! Handle-based lifecycle for particle text instances
//!
//! The owning visual module creates an instance from a configuration,
//! advances it once per frame with the frame's [`RepulsionContext`], and
//! disposes it when the element leaves the scene. Instances never see each
//! other; the only shared input is the read-only repulsion context.

use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;

use crate::cloud::{PointCloudBuilder, PointSet, ScatterInitializer};
use crate::config::{ConfigError, ParticleTextConfig};
use crate::input::RepulsionContext;
use crate::physics::{FormationPhase, FormationState, SequentialScheduler, SpringRepulsionIntegrator, StepStats};
use crate::render::{PointCloudScene, SceneObjectId};
use crate::text::{FontError, FontdueRenderer, GlyphRenderer, TextRasterizer};

slotmap::new_key_type! {
    /// Opaque handle to one particle text instance
    pub struct ParticleTextHandle;
}

/// Errors from the particle text lifecycle
#[derive(thiserror::Error, Debug)]
pub enum ParticleError {
    /// Handle was never issued or has been disposed
    #[error("Invalid particle text handle {0:?}")]
    InvalidHandle(ParticleTextHandle),

    /// `complete_create` was called twice for the same handle
    #[error("Particle text {0:?} is already built")]
    AlreadyBuilt(ParticleTextHandle),

    /// Configuration rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Font could not be loaded
    #[error("Font error: {0}")]
    Font(#[from] FontError),
}

/// Result type for lifecycle operations
pub type ParticleResult<T> = Result<T, ParticleError>;

/// One live particle text
struct ParticleText {
    config: ParticleTextConfig,
    points: PointSet,
    formation: FormationState,
    integrator: SpringRepulsionIntegrator,
    scheduler: Option<SequentialScheduler>,
    scene_object: Option<SceneObjectId>,
    built: bool,
    rng: StdRng,
}

impl ParticleText {
    fn pending(config: ParticleTextConfig) -> Self {
        let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            integrator: SpringRepulsionIntegrator::from_config(&config.physics),
            formation: FormationState::forming(config.formation_duration_ms),
            config,
            points: PointSet::empty(),
            scheduler: None,
            scene_object: None,
            built: false,
            rng,
        }
    }

    /// Rasterize, build and scatter, replacing any previous point set
    fn build<S: PointCloudScene + ?Sized>(&mut self, rasterizer: &TextRasterizer, scene: &mut S) {
        if let Some(old) = self.scene_object.take() {
            scene.remove_point_cloud(old);
        }

        let config = &self.config;
        let raster = rasterizer.rasterize(
            &config.text,
            config.raster.font_size_px,
            config.raster.canvas_width,
            config.raster.canvas_height,
        );
        let mut points = PointCloudBuilder::from_config(config)
            .build(raster.ink_pixels(config.raster.sample_stride, config.raster.alpha_threshold));

        if points.is_empty() {
            log::warn!(
                "Text {:?} produced no ink pixels with {}; keeping an empty point set",
                config.text, rasterizer.renderer_name()
            );
        }

        let (formation, scheduler) = match &config.sequential {
            Some(sequential) => {
                let scheduler = SequentialScheduler::new(sequential, config.point_size, &mut points, &mut self.rng);
                let mut formation = FormationState::spawning();
                if scheduler.is_complete() {
                    formation.finish_spawning();
                }
                (formation, Some(scheduler))
            }
            None => {
                ScatterInitializer::from_config(config).scatter(&mut points, &mut self.rng);
                (FormationState::forming(config.formation_duration_ms), None)
            }
        };

        let id = scene.create_point_cloud(&config.text, points.len());
        scene.upload(id, points.positions_flat(), points.sizes(), points.alphas());

        log::info!(
            "Built particle text {:?}: {} points, {:?}",
            config.text, points.len(), formation.phase()
        );

        self.integrator = SpringRepulsionIntegrator::from_config(&config.physics);
        self.points = points;
        self.formation = formation;
        self.scheduler = scheduler;
        self.scene_object = Some(id);
        self.built = true;
    }

    fn update<S: PointCloudScene + ?Sized>(
        &mut self,
        context: &RepulsionContext,
        delta_time: f32,
        scene: &mut S,
    ) -> StepStats {
        if !self.built {
            return StepStats::default();
        }

        if let Some(scheduler) = &mut self.scheduler {
            scheduler.advance(&mut self.points, delta_time, &mut self.rng);
            self.formation.set_spawn_progress(scheduler.progress());
            if scheduler.is_complete() {
                self.formation.finish_spawning();
            }
        }
        self.formation.advance(delta_time * 1000.0);

        let stats = self.integrator.step(&mut self.points, context, self.formation.progress());

        if let Some(scheduler) = &mut self.scheduler {
            scheduler.pulse(&mut self.points, delta_time);
        }
        self.points.sync_buffers();

        if let Some(id) = self.scene_object {
            scene.upload(id, self.points.positions_flat(), self.points.sizes(), self.points.alphas());
        }
        stats
    }
}

/// Owner of every particle text instance in a scene
pub struct ParticleTextSystem {
    rasterizer: TextRasterizer,
    instances: SlotMap<ParticleTextHandle, ParticleText>,
}

impl ParticleTextSystem {
    /// Create a system that rasterizes with the built-in block font
    pub fn new() -> Self {
        Self::with_rasterizer(TextRasterizer::with_block_font())
    }

    /// Create a system with a specific glyph renderer
    pub fn with_renderer(renderer: Box<dyn GlyphRenderer>) -> Self {
        Self::with_rasterizer(TextRasterizer::new(renderer))
    }

    /// Create a system that rasterizes with a TrueType or OpenType font file
    pub fn with_font_file(path: impl AsRef<std::path::Path>) -> ParticleResult<Self> {
        let renderer = FontdueRenderer::from_file(path)?;
        Ok(Self::with_renderer(Box::new(renderer)))
    }

    /// Create a system around an existing rasterizer
    pub fn with_rasterizer(rasterizer: TextRasterizer) -> Self {
        log::debug!("Particle text system using {}", rasterizer.renderer_name());
        Self {
            rasterizer,
            instances: SlotMap::with_key(),
        }
    }

    /// Register an instance without building it yet
    ///
    /// The returned handle is valid immediately; `update` on it does nothing
    /// until [`Self::complete_create`] runs.
    pub fn begin_create(&mut self, config: ParticleTextConfig) -> ParticleResult<ParticleTextHandle> {
        config.validate()?;
        let handle = self.instances.insert(ParticleText::pending(config));
        log::debug!("Registered pending particle text {:?}", handle);
        Ok(handle)
    }

    /// Build a pending instance and add it to the scene
    pub fn complete_create<S: PointCloudScene + ?Sized>(
        &mut self,
        handle: ParticleTextHandle,
        scene: &mut S,
    ) -> ParticleResult<()> {
        let instance = self.instances.get_mut(handle).ok_or(ParticleError::InvalidHandle(handle))?;
        if instance.built {
            return Err(ParticleError::AlreadyBuilt(handle));
        }
        instance.build(&self.rasterizer, scene);
        Ok(())
    }

    /// Register and build an instance in one go
    pub fn create<S: PointCloudScene + ?Sized>(
        &mut self,
        config: ParticleTextConfig,
        scene: &mut S,
    ) -> ParticleResult<ParticleTextHandle> {
        let handle = self.begin_create(config)?;
        self.complete_create(handle, scene)?;
        Ok(handle)
    }

    /// Advance one instance by one frame
    pub fn update<S: PointCloudScene + ?Sized>(
        &mut self,
        handle: ParticleTextHandle,
        context: &RepulsionContext,
        delta_time: f32,
        scene: &mut S,
    ) -> ParticleResult<StepStats> {
        let instance = self.instances.get_mut(handle).ok_or(ParticleError::InvalidHandle(handle))?;
        Ok(instance.update(context, delta_time, scene))
    }

    /// Advance every instance by one frame with the same context
    pub fn update_all<S: PointCloudScene + ?Sized>(
        &mut self,
        context: &RepulsionContext,
        delta_time: f32,
        scene: &mut S,
    ) -> StepStats {
        self.instances
            .values_mut()
            .map(|instance| instance.update(context, delta_time, scene))
            .fold(StepStats::default(), |total, stats| StepStats {
                stepped: total.stepped + stats.stepped,
                repelled: total.repelled + stats.repelled,
            })
    }

    /// Replace an instance's text, restarting its formation from scratch
    pub fn set_text<S: PointCloudScene + ?Sized>(
        &mut self,
        handle: ParticleTextHandle,
        text: impl Into<String>,
        scene: &mut S,
    ) -> ParticleResult<()> {
        let instance = self.instances.get_mut(handle).ok_or(ParticleError::InvalidHandle(handle))?;
        instance.config.text = text.into();
        if instance.built {
            instance.build(&self.rasterizer, scene);
        }
        Ok(())
    }

    /// Remove an instance and release its scene object
    pub fn dispose<S: PointCloudScene + ?Sized>(
        &mut self,
        handle: ParticleTextHandle,
        scene: &mut S,
    ) -> ParticleResult<()> {
        let instance = self.instances.remove(handle).ok_or(ParticleError::InvalidHandle(handle))?;
        if let Some(id) = instance.scene_object {
            scene.remove_point_cloud(id);
        }
        log::info!("Disposed particle text {:?}", instance.config.text);
        Ok(())
    }

    /// Points of an instance
    pub fn point_set(&self, handle: ParticleTextHandle) -> Option<&PointSet> {
        self.instances.get(handle).map(|instance| &instance.points)
    }

    /// Formation state of an instance
    pub fn formation(&self, handle: ParticleTextHandle) -> Option<&FormationState> {
        self.instances.get(handle).map(|instance| &instance.formation)
    }

    /// Formation phase of an instance
    pub fn phase(&self, handle: ParticleTextHandle) -> Option<FormationPhase> {
        self.formation(handle).map(FormationState::phase)
    }

    /// Configuration of an instance
    pub fn config(&self, handle: ParticleTextHandle) -> Option<&ParticleTextConfig> {
        self.instances.get(handle).map(|instance| &instance.config)
    }

    /// Scene object backing an instance, once built
    pub fn scene_object(&self, handle: ParticleTextHandle) -> Option<SceneObjectId> {
        self.instances.get(handle).and_then(|instance| instance.scene_object)
    }

    /// Whether an instance has been built
    pub fn is_built(&self, handle: ParticleTextHandle) -> bool {
        self.instances.get(handle).is_some_and(|instance| instance.built)
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True when no instance is alive
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Handles of every live instance
    pub fn handles(&self) -> impl Iterator<Item = ParticleTextHandle> + '_ {
        self.instances.keys()
    }
}

impl Default for ParticleTextSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPresets;
    use crate::render::HeadlessScene;

    fn seeded(text: &str) -> ParticleTextConfig {
        ParticleTextConfig::new(text).with_seed(9)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut system = ParticleTextSystem::new();
        let mut config = seeded("A");
        config.physics.damping = 1.2;
        assert!(matches!(system.begin_create(config), Err(ParticleError::Config(_))));
        assert!(system.is_empty());
    }

    #[test]
    fn test_missing_font_file_is_reported() {
        let result = ParticleTextSystem::with_font_file("/nonexistent/title.otf");
        assert!(matches!(result, Err(ParticleError::Font(FontError::Io(_)))));
    }

    #[test]
    fn test_pending_instance_ignores_updates() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let handle = system.begin_create(seeded("A")).unwrap();

        let stats = system.update(handle, &RepulsionContext::inactive(), 0.016, &mut scene).unwrap();
        assert_eq!(stats, StepStats::default());
        assert!(!system.is_built(handle));
        assert_eq!(scene.cloud_count(), 0);

        system.complete_create(handle, &mut scene).unwrap();
        assert!(system.is_built(handle));
        assert_eq!(scene.cloud_count(), 1);
        assert!(matches!(
            system.complete_create(handle, &mut scene),
            Err(ParticleError::AlreadyBuilt(_))
        ));
    }

    #[test]
    fn test_update_uploads_live_buffers() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let handle = system.create(seeded("HI"), &mut scene).unwrap();
        system.update(handle, &RepulsionContext::inactive(), 0.016, &mut scene).unwrap();

        let points = system.point_set(handle).unwrap();
        let cloud = scene.cloud(system.scene_object(handle).unwrap()).unwrap();
        assert_eq!(cloud.positions, points.positions_flat());
        assert_eq!(cloud.positions.len(), points.len() * 3);
        assert_eq!(cloud.upload_count, 2);
    }

    #[test]
    fn test_set_text_rebuilds_from_scratch() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let handle = system.create(seeded("I"), &mut scene).unwrap();
        let first_object = system.scene_object(handle).unwrap();
        let first_len = system.point_set(handle).unwrap().len();

        for _ in 0..200 {
            system.update(handle, &RepulsionContext::inactive(), 0.016, &mut scene).unwrap();
        }
        assert_eq!(system.phase(handle), Some(FormationPhase::Settled));

        system.set_text(handle, "WWW", &mut scene).unwrap();
        assert_eq!(system.phase(handle), Some(FormationPhase::Forming));
        assert_eq!(system.formation(handle).unwrap().elapsed_ms(), 0.0);
        assert!(system.point_set(handle).unwrap().len() > first_len);
        assert_ne!(system.scene_object(handle), Some(first_object));
        assert_eq!(scene.cloud_count(), 1);
    }

    #[test]
    fn test_dispose_releases_scene_object() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let handle = system.create(seeded("OK"), &mut scene).unwrap();

        system.dispose(handle, &mut scene).unwrap();
        assert_eq!(scene.cloud_count(), 0);
        assert!(matches!(
            system.update(handle, &RepulsionContext::inactive(), 0.016, &mut scene),
            Err(ParticleError::InvalidHandle(_))
        ));
        assert!(matches!(system.dispose(handle, &mut scene), Err(ParticleError::InvalidHandle(_))));
    }

    #[test]
    fn test_empty_text_builds_empty_set() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let handle = system.create(seeded("~ ~"), &mut scene).unwrap();

        assert!(system.point_set(handle).unwrap().is_empty());
        let stats = system.update(handle, &RepulsionContext::at(crate::foundation::math::Vec3::zeros()), 0.016, &mut scene).unwrap();
        assert_eq!(stats.stepped, 0);

        let skills = system.create(ConfigPresets::skills_title("").with_seed(1), &mut scene).unwrap();
        assert_eq!(system.phase(skills), Some(FormationPhase::Settled));
    }

    #[test]
    fn test_update_all_steps_every_instance() {
        let mut system = ParticleTextSystem::new();
        let mut scene = HeadlessScene::new();
        let a = system.create(seeded("A"), &mut scene).unwrap();
        let b = system.create(seeded("B"), &mut scene).unwrap();

        let stats = system.update_all(&RepulsionContext::inactive(), 0.016, &mut scene);
        let expected = system.point_set(a).unwrap().len() + system.point_set(b).unwrap().len();
        assert_eq!(stats.stepped, expected);
        assert_eq!(system.handles().count(), 2);
    }
}
