use std::{collections::HashMap, sync::Arc};

use crate::{
    camera::Camera,
    core::{
        color::Color,
        scene::{Object, Scene},
    },
    light::Light,
    material::Material,
    primitive::Primitive,
};

/// Named resources collected while a scene file is read. Lookups by name are
/// errors when the name is unknown, adding a name twice is an error too.
#[derive(Default)]
pub struct SceneResources {
    cameras: HashMap<String, Camera>,
    materials: Vec<Material>,
    material_indices: HashMap<String, usize>,
    primitives: HashMap<String, Arc<Primitive>>,
    objects: Vec<Object>,
    object_indices: HashMap<String, usize>,
    collections: HashMap<String, Vec<String>>,
    lights: Vec<Light>,
    light_names: Vec<String>,
    environment: Option<Color>,
}

impl SceneResources {
    pub fn to_scene(self) -> anyhow::Result<Scene> {
        for (name, members) in &self.collections {
            for member in members {
                if !self.object_indices.contains_key(member) {
                    anyhow::bail!(format!(
                        "collection-{}: there is no object named '{}'",
                        name, member
                    ));
                }
            }
        }

        log::info!(
            "{} objects, {} materials, {} lights, {} cameras",
            self.objects.len(),
            self.materials.len(),
            self.lights.len(),
            self.cameras.len()
        );

        Ok(Scene::new(
            self.materials,
            self.objects,
            self.collections,
            self.cameras,
            self.lights,
            self.environment.unwrap_or(Color::BLACK),
        ))
    }

    pub fn add_camera(&mut self, name: String, camera: Camera) -> anyhow::Result<()> {
        if self.cameras.contains_key(&name) {
            anyhow::bail!(format!("Duplicated camera name '{}'", name));
        }
        self.cameras.insert(name, camera);
        Ok(())
    }

    pub fn add_light(&mut self, name: String, light: Light) -> anyhow::Result<()> {
        if self.light_names.contains(&name) {
            anyhow::bail!(format!("Duplicated light name '{}'", name));
        }
        self.light_names.push(name);
        self.lights.push(light);
        Ok(())
    }

    pub fn set_environment(&mut self, color: Color) -> anyhow::Result<()> {
        if self.environment.is_some() {
            anyhow::bail!("Environment has been set before");
        }
        self.environment = Some(color);
        Ok(())
    }

    pub fn add_material(&mut self, material: Material) -> anyhow::Result<()> {
        let name = material.name().to_owned();
        if self.material_indices.contains_key(&name) {
            anyhow::bail!(format!("Duplicated material name '{}'", name));
        }
        self.material_indices.insert(name, self.materials.len());
        self.materials.push(material);
        Ok(())
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.material_indices
            .get(name)
            .map(|&index| &self.materials[index])
    }

    pub fn material_index(&self, name: &str) -> anyhow::Result<usize> {
        if let Some(index) = self.material_indices.get(name) {
            Ok(*index)
        } else {
            anyhow::bail!(format!("There is no material named '{}'", name))
        }
    }

    pub fn add_primitive(&mut self, name: String, primitive: Primitive) -> anyhow::Result<()> {
        if self.primitives.contains_key(&name) {
            anyhow::bail!(format!("Duplicated primitive name '{}'", name));
        }
        self.primitives.insert(name, Arc::new(primitive));
        Ok(())
    }

    pub fn clone_primitive(&self, name: &str) -> anyhow::Result<Arc<Primitive>> {
        if let Some(primitive) = self.primitives.get(name) {
            Ok(primitive.clone())
        } else {
            anyhow::bail!(format!("There is no primitive named '{}'", name))
        }
    }

    pub fn add_object(&mut self, object: Object) -> anyhow::Result<()> {
        let name = object.name().to_owned();
        if self.object_indices.contains_key(&name) {
            anyhow::bail!(format!("Duplicated object name '{}'", name));
        }
        self.object_indices.insert(name, self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    pub fn add_collection(&mut self, name: String, members: Vec<String>) -> anyhow::Result<()> {
        if self.collections.contains_key(&name) {
            anyhow::bail!(format!("Duplicated collection name '{}'", name));
        }
        self.collections.insert(name, members);
        Ok(())
    }
}
