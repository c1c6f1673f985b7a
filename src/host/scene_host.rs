use std::path::Path;

use anyhow::Context;

use crate::{
    core::{scene::Scene, settings::RenderSettings},
    loader,
    material::Material,
    renderer::{self, OutputConfig, RendererT},
};

use super::Host;

/// `Host` backed by an in-process scene and the CPU renderers.
pub struct SceneHost {
    scene: Scene,
}

impl SceneHost {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let scene = loader::load_scene(path)
            .context(format!("can't load scene '{}'", path.display()))?;
        Ok(Self::new(scene))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Host for SceneHost {
    fn material_names(&self) -> Vec<String> {
        self.scene
            .materials()
            .iter()
            .map(|material| material.name().to_owned())
            .collect()
    }

    fn material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.scene.material_mut(name)
    }

    fn collection(&self, name: &str) -> Option<Vec<String>> {
        self.scene.collection(name).map(|members| members.to_vec())
    }

    fn object_names(&self) -> Vec<String> {
        self.scene
            .objects()
            .iter()
            .map(|object| object.name().to_owned())
            .collect()
    }

    fn set_hide_render(&mut self, object: &str, hide: bool) -> bool {
        match self.scene.object_mut(object) {
            Some(object) => {
                object.set_hide_render(hide);
                true
            }
            None => false,
        }
    }

    fn has_camera(&self, name: &str) -> bool {
        self.scene.has_camera(name)
    }

    fn set_camera(&mut self, name: &str) -> bool {
        self.scene.set_active_camera(name)
    }

    fn settings_mut(&mut self) -> &mut RenderSettings {
        self.scene.settings_mut()
    }

    fn render_still(&mut self) -> anyhow::Result<()> {
        let settings = self.scene.settings();
        let view = self.scene.view()?;
        let renderer = renderer::create_renderer(settings);
        let config = OutputConfig {
            width: settings.resolution_x,
            height: settings.resolution_y,
            color_mode: settings.image.color_mode,
        };
        if config.width == 0 || config.height == 0 {
            anyhow::bail!(format!(
                "resolution {}x{} is empty",
                config.width, config.height
            ));
        }

        log::info!(
            "rendering {}x{} with {:?} to '{}'",
            config.width,
            config.height,
            settings.engine,
            settings.filepath.display()
        );
        let begin_time = std::time::Instant::now();
        let image = renderer.render(&view, &config)?;
        image.save(
            &settings.filepath,
            settings.image.file_format,
            settings.image.color_mode,
        )?;
        log::info!("finished, time used: {:?}", begin_time.elapsed());

        Ok(())
    }
}
