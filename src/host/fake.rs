use std::{collections::HashMap, path::PathBuf};

use crate::{core::settings::RenderSettings, material::Material};

use super::Host;

pub struct RenderCall {
    pub camera: Option<String>,
    pub filepath: PathBuf,
    pub settings: RenderSettings,
}

/// In-memory host recording every render. A render touches an empty file at
/// the requested path, so directory handling can be checked.
#[derive(Default)]
pub struct FakeHost {
    pub materials: Vec<Material>,
    pub objects: Vec<(String, bool)>,
    pub collections: HashMap<String, Vec<String>>,
    pub cameras: Vec<String>,
    pub active_camera: Option<String>,
    pub settings: RenderSettings,
    pub renders: Vec<RenderCall>,
}

impl FakeHost {
    pub fn with_objects(names: &[&str]) -> Self {
        Self {
            objects: names.iter().map(|name| (name.to_string(), false)).collect(),
            ..Default::default()
        }
    }

    pub fn is_hidden(&self, object: &str) -> bool {
        self.objects
            .iter()
            .any(|(name, hidden)| name == object && *hidden)
    }
}

impl Host for FakeHost {
    fn material_names(&self) -> Vec<String> {
        self.materials
            .iter()
            .map(|material| material.name().to_owned())
            .collect()
    }

    fn material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials
            .iter_mut()
            .find(|material| material.name() == name)
    }

    fn collection(&self, name: &str) -> Option<Vec<String>> {
        self.collections.get(name).cloned()
    }

    fn object_names(&self) -> Vec<String> {
        self.objects.iter().map(|(name, _)| name.clone()).collect()
    }

    fn set_hide_render(&mut self, object: &str, hide: bool) -> bool {
        match self.objects.iter_mut().find(|(name, _)| name == object) {
            Some((_, hidden)) => {
                *hidden = hide;
                true
            }
            None => false,
        }
    }

    fn has_camera(&self, name: &str) -> bool {
        self.cameras.iter().any(|camera| camera == name)
    }

    fn set_camera(&mut self, name: &str) -> bool {
        if self.has_camera(name) {
            self.active_camera = Some(name.to_owned());
            true
        } else {
            false
        }
    }

    fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    fn render_still(&mut self) -> anyhow::Result<()> {
        std::fs::write(&self.settings.filepath, b"")?;
        self.renders.push(RenderCall {
            camera: self.active_camera.clone(),
            filepath: self.settings.filepath.clone(),
            settings: self.settings.clone(),
        });
        Ok(())
    }
}
