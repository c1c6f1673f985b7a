mod denoise;
mod pt;
mod raster;
mod util;

pub use denoise::*;
pub use pt::*;
pub use raster::*;

use crate::core::{
    film::RenderedImage,
    scene::SceneView,
    settings::{ColorMode, Engine, RenderSettings},
};

pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

#[enum_dispatch::enum_dispatch(Renderer)]
pub trait RendererT: Send + Sync {
    fn render(&self, view: &SceneView<'_>, config: &OutputConfig)
        -> anyhow::Result<RenderedImage>;
}

#[enum_dispatch::enum_dispatch]
pub enum Renderer {
    PathTracer,
    RasterRenderer,
}

pub fn create_renderer(settings: &RenderSettings) -> Renderer {
    match settings.engine {
        Engine::PathTraced => PathTracer::new(
            PathTracer::MAX_DEPTH,
            settings.path_traced.samples,
            settings.path_traced.use_adaptive_sampling,
            settings.path_traced.use_denoising,
        )
        .into(),
        Engine::Raster => RasterRenderer::new(settings.raster.taa_render_samples).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::scene::Scene, loader};

    fn ball_scene() -> Scene {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let json = serde_json::json!({
            "cameras": [{ "type": "perspective", "name": "cam", "eye": [0, 0, 4], "forward": [0, 0, -1], "fov": 40 }],
            "materials": [
                { "name": "red", "nodes": [{ "type": "principled", "name": "principled", "base_color": [0.8, 0.1, 0.1] }] },
            ],
            "primitives": [{ "type": "sphere", "name": "ball", "radius": 1 }],
            "objects": [
                { "name": "ball", "primitive": "ball", "material": "red" },
                { "name": "hidden", "primitive": "ball", "material": "red", "translate": [0, 1.3, 0], "scale": [0.2, 0.2, 0.2], "hide_render": true },
            ],
            "lights": [{ "type": "directional", "name": "sun", "direction": [0, 0, -1], "strength": [3, 3, 3] }],
            "environment": { "color": [0.2, 0.3, 0.4] },
        });
        std::fs::write(&path, json.to_string()).unwrap();
        let mut scene = loader::load_scene(&path).unwrap();
        assert!(scene.set_active_camera("cam"));
        scene
    }

    fn render_with(renderer: Renderer, color_mode: ColorMode) -> crate::core::film::RenderedImage {
        let scene = ball_scene();
        let view = scene.view().unwrap();
        let config = OutputConfig {
            width: 16,
            height: 12,
            color_mode,
        };
        renderer.render(&view, &config).unwrap()
    }

    #[test]
    fn raster_covers_the_ball_only() {
        let image = render_with(RasterRenderer::new(4).into(), ColorMode::Rgba);
        assert_eq!((image.width, image.height), (16, 12));
        let center = image.pixel(8, 6);
        assert_eq!(center[3], 1.0);
        assert!(center[0] > center[2]);
        assert_eq!(image.pixel(0, 0), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn opaque_background_is_environment() {
        let image = render_with(RasterRenderer::new(1).into(), ColorMode::Rgb);
        let corner = image.pixel(0, 0);
        assert!((corner[0] - 0.2).abs() < 1e-5);
        assert!((corner[2] - 0.4).abs() < 1e-5);
        assert_eq!(corner[3], 1.0);
    }

    #[test]
    fn path_tracer_renders_with_denoise_and_adaptive_sampling() {
        let image = render_with(PathTracer::new(4, 8, true, true).into(), ColorMode::Rgba);
        assert_eq!(image.pixels.len(), 16 * 12);
        assert_eq!(image.pixel(8, 6)[3], 1.0);
        assert_eq!(image.pixel(0, 0)[3], 0.0);
        assert!(image.pixels.iter().all(|p| p.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn hidden_objects_are_not_in_the_view() {
        let mut scene = ball_scene();
        assert_eq!(scene.view().unwrap().aggregate.len(), 1);
        scene.object_mut("hidden").unwrap().set_hide_render(false);
        assert_eq!(scene.view().unwrap().aggregate.len(), 2);
    }

    #[test]
    fn engine_picks_renderer() {
        let mut settings = RenderSettings::default();
        assert!(matches!(create_renderer(&settings), Renderer::RasterRenderer(_)));
        settings.engine = Engine::PathTraced;
        assert!(matches!(create_renderer(&settings), Renderer::PathTracer(_)));
    }
}
