//! Portfolio title demo
//!
//! Builds every title of a scene configuration, then drives them for a few
//! seconds of fixed-step frames with an orbiting camera and a scripted
//! pointer sweep. Progress goes to the log; nothing is drawn.
//!
//! Usage: `portfolio_demo [scene.ron|scene.toml] [--font FILE] [--dump-raster DIR]`

use particle_text::config::{Config, ConfigError, SceneConfig};
use particle_text::foundation::logging;
use particle_text::foundation::math::{constants::TAU, Vec3};
use particle_text::foundation::time::FrameTimer;
use particle_text::input::{PointerProjector, PointerState};
use particle_text::render::{Camera, HeadlessScene};
use particle_text::text::{load_font_or_fallback, TextRasterizer};
use particle_text::{ParticleError, ParticleTextHandle, ParticleTextSystem};

const FRAME_RATE: f32 = 60.0;
const DEMO_SECONDS: f32 = 6.0;
const ORBIT_RADIUS: f32 = 6.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Particle text error: {0}")]
    Particle(#[from] ParticleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Missing value for {0}")]
    MissingArgument(&'static str),
}

#[derive(Debug, Default)]
struct DemoArgs {
    scene_path: Option<String>,
    font_path: Option<String>,
    dump_dir: Option<String>,
}

impl DemoArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, DemoError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--font" => parsed.font_path = Some(args.next().ok_or(DemoError::MissingArgument("--font"))?),
                "--dump-raster" => {
                    parsed.dump_dir = Some(args.next().ok_or(DemoError::MissingArgument("--dump-raster"))?);
                }
                _ => parsed.scene_path = Some(arg),
            }
        }
        Ok(parsed)
    }
}

struct PortfolioDemo {
    scene_config: SceneConfig,
    system: ParticleTextSystem,
    scene: HeadlessScene,
    camera: Camera,
    projector: PointerProjector,
    pointer: PointerState,
    timer: FrameTimer,
    titles: Vec<ParticleTextHandle>,
}

impl PortfolioDemo {
    fn new(scene_config: SceneConfig, rasterizer: TextRasterizer) -> Self {
        log::info!("Creating portfolio demo with {} titles", scene_config.titles.len());
        Self {
            camera: scene_config.camera.to_camera(),
            projector: PointerProjector::new(scene_config.pointer_plane_distance),
            system: ParticleTextSystem::with_rasterizer(rasterizer),
            scene: HeadlessScene::new(),
            pointer: PointerState::new(),
            timer: FrameTimer::fixed(1.0 / FRAME_RATE),
            titles: Vec::new(),
            scene_config,
        }
    }

    /// Register every title first, then build them, like a scene that
    /// reserves slots before its assets are ready
    fn initialize(&mut self) -> Result<(), DemoError> {
        for title in &self.scene_config.titles {
            let handle = self.system.begin_create(title.clone())?;
            self.titles.push(handle);
        }
        for &handle in &self.titles {
            self.system.complete_create(handle, &mut self.scene)?;
        }
        log::info!("Built {} point clouds", self.scene.cloud_count());
        Ok(())
    }

    fn run(&mut self) -> Result<(), DemoError> {
        let base_position = Vec3::from(self.scene_config.camera.position);

        while self.timer.total_time() < DEMO_SECONDS {
            let delta_time = self.timer.tick();
            let t = self.timer.total_time();

            // Slow orbit so the projected pointer plane keeps moving
            let angle = t / DEMO_SECONDS * TAU;
            self.camera.set_position(base_position + Vec3::new(angle.sin(), angle.cos() * 0.5, 0.0) * ORBIT_RADIUS);

            self.script_pointer(t);
            let context = self.projector.context(&self.pointer, &self.camera);
            let stats = self.system.update_all(&context, delta_time, &mut self.scene);

            if self.timer.frame_count() % 60 == 0 {
                log::info!(
                    "t={:.1}s stepped={} repelled={} pointer={:?}",
                    t,
                    stats.stepped,
                    stats.repelled,
                    context.active.then_some(context.pointer_world)
                );
                self.log_titles();
            }
        }
        Ok(())
    }

    /// Enter after one second, sweep left to right, then leave
    fn script_pointer(&mut self, t: f32) {
        if t < 1.0 {
            return;
        }
        if t > DEMO_SECONDS - 1.0 {
            if self.pointer.is_over_viewport() {
                log::debug!("Pointer left the viewport");
                self.pointer.leave();
            }
            return;
        }
        let sweep = (t - 1.0) / (DEMO_SECONDS - 2.0);
        self.pointer.move_to(sweep * 1.6 - 0.8, (sweep * TAU).sin() * 0.2);
    }

    fn log_titles(&self) {
        for &handle in &self.titles {
            let (Some(config), Some(formation), Some(points)) = (
                self.system.config(handle),
                self.system.formation(handle),
                self.system.point_set(handle),
            ) else {
                continue;
            };
            log::info!(
                "  {:?}: {:?} progress={:.2} active={}/{} max_offset={:.2}",
                config.text,
                formation.phase(),
                formation.progress(),
                points.active_count(),
                points.len(),
                points.max_home_distance()
            );
        }
    }

    fn dispose(&mut self) -> Result<(), DemoError> {
        for handle in self.titles.drain(..) {
            self.system.dispose(handle, &mut self.scene)?;
        }
        log::info!("Disposed all titles, {} clouds left", self.scene.cloud_count());
        Ok(())
    }
}

fn load_rasterizer(font_path: Option<&str>) -> Result<TextRasterizer, DemoError> {
    let font_data = font_path.map(std::fs::read).transpose()?;
    Ok(TextRasterizer::new(load_font_or_fallback(font_data.as_deref())))
}

fn dump_rasters(scene_config: &SceneConfig, rasterizer: &TextRasterizer, dir: &str) -> Result<(), DemoError> {
    std::fs::create_dir_all(dir)?;
    for (index, title) in scene_config.titles.iter().enumerate() {
        let raster = rasterizer.rasterize(
            &title.text,
            title.raster.font_size_px,
            title.raster.canvas_width,
            title.raster.canvas_height,
        );
        let path = std::path::Path::new(dir).join(format!("title_{index}.png"));
        raster
            .canvas()
            .to_image()
            .save(&path)
            .map_err(|e| DemoError::Image(e.to_string()))?;
        log::info!("Wrote raster of {:?} to {}", title.text, path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting portfolio particle text demo");

    let args = DemoArgs::parse(std::env::args().skip(1))?;
    let scene_config = match &args.scene_path {
        Some(path) => {
            log::info!("Loading scene from {}", path);
            SceneConfig::load_from_file(path)?
        }
        None => SceneConfig::default(),
    };
    scene_config.validate()?;

    let rasterizer = load_rasterizer(args.font_path.as_deref())?;
    if let Some(dir) = &args.dump_dir {
        dump_rasters(&scene_config, &rasterizer, dir)?;
    }

    let mut demo = PortfolioDemo::new(scene_config, rasterizer);
    let result = demo.initialize().and_then(|()| demo.run());
    demo.dispose()?;

    match result {
        Ok(()) => {
            log::info!("Portfolio demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Demo error: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_scene_parses_and_validates() {
        let scene = SceneConfig::from_str_with_format(include_str!("../config/scene.ron"), "scene.ron").unwrap();
        scene.validate().unwrap();
        assert_eq!(scene.titles.len(), 3);
        assert!(scene.titles[2].sequential.is_some());
    }

    #[test]
    fn test_args_parse_flags_and_scene() {
        let args = ["scene.toml", "--font", "Inter.ttf"].map(String::from);
        let parsed = DemoArgs::parse(args.into_iter()).unwrap();
        assert_eq!(parsed.scene_path.as_deref(), Some("scene.toml"));
        assert_eq!(parsed.font_path.as_deref(), Some("Inter.ttf"));
        assert!(parsed.dump_dir.is_none());

        let missing = DemoArgs::parse(["--dump-raster".to_string()].into_iter());
        assert!(matches!(missing, Err(DemoError::MissingArgument("--dump-raster"))));
    }

    #[test]
    fn test_demo_runs_and_cleans_up() {
        let mut demo = PortfolioDemo::new(SceneConfig::default(), TextRasterizer::with_block_font());
        demo.initialize().unwrap();
        assert_eq!(demo.scene.cloud_count(), 3);
        demo.run().unwrap();
        demo.dispose().unwrap();
        assert_eq!(demo.scene.cloud_count(), 0);
        assert!(demo.system.is_empty());
    }
}
