use std::{collections::HashMap, sync::Arc};

use crate::{
    camera::Camera,
    core::{
        color::Color, loader::InputParams, scene_resources::SceneResources,
        settings::RenderSettings,
    },
    light::Light,
    material::{Material, SurfaceShading},
    primitive::{BvhAccel, Instance, Primitive},
};

/// A named placement of a primitive with a material.
pub struct Object {
    name: String,
    primitive: Arc<Primitive>,
    trans: glam::Affine3A,
    material: usize,
    hide_render: bool,
}

impl Object {
    pub fn new(
        name: &str,
        primitive: Arc<Primitive>,
        trans: glam::Affine3A,
        material: usize,
    ) -> Self {
        Self {
            name: name.to_owned(),
            primitive,
            trans,
            material,
            hide_render: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hide_render(&self) -> bool {
        self.hide_render
    }

    pub fn set_hide_render(&mut self, hide: bool) {
        self.hide_render = hide;
    }

    pub fn load(rsc: &mut SceneResources, params: &mut InputParams) -> anyhow::Result<()> {
        params.set_name("object".into());
        let name = params.get_str("name")?;
        params.set_name(format!("object-{}", name).into());

        let mut trans = glam::Affine3A::IDENTITY;
        if params.contains_key("matrix") {
            trans = glam::Affine3A::from_mat4(params.get_matrix("matrix")?);
        }
        if params.contains_key("scale") {
            trans = glam::Affine3A::from_scale(params.get_float3("scale")?.into()) * trans;
        }
        if params.contains_key("rotate") {
            let rotate = params.get_float3("rotate")?;
            trans = glam::Affine3A::from_rotation_z(rotate[2].to_radians())
                * glam::Affine3A::from_rotation_x(rotate[0].to_radians())
                * glam::Affine3A::from_rotation_y(rotate[1].to_radians())
                * trans;
        }
        if params.contains_key("translate") {
            trans =
                glam::Affine3A::from_translation(params.get_float3("translate")?.into()) * trans;
        }
        if trans.matrix3.determinant() == 0.0 {
            anyhow::bail!(format!("{}: transform matrix is singular", params.name()));
        }

        let primitive = rsc.clone_primitive(&params.get_str("primitive")?)?;
        let material = rsc.material_index(&params.get_str("material")?)?;

        let mut object = Self::new(&name, primitive, trans, material);
        object.set_hide_render(params.get_bool_or("hide_render", false)?);
        rsc.add_object(object)?;

        params.check_unused_keys();

        Ok(())
    }
}

pub fn create_collection_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("collection".into());
    let name = params.get_str("name")?;
    params.set_name(format!("collection-{}", name).into());

    let members = params.get_str_array("objects")?;
    rsc.add_collection(name, members)?;

    params.check_unused_keys();

    Ok(())
}

pub struct Scene {
    materials: Vec<Material>,
    objects: Vec<Object>,
    collections: HashMap<String, Vec<String>>,
    cameras: HashMap<String, Camera>,
    lights: Vec<Light>,
    environment: Color,
    active_camera: Option<String>,
    settings: RenderSettings,
}

/// Everything a renderer reads for one frame. Only visible objects are in the
/// aggregate, `shading` is indexed by `Instance::material`.
pub struct SceneView<'a> {
    pub aggregate: BvhAccel<Instance>,
    pub shading: Vec<SurfaceShading>,
    pub lights: &'a [Light],
    pub environment: Color,
    pub camera: &'a Camera,
}

impl Scene {
    pub fn new(
        materials: Vec<Material>,
        objects: Vec<Object>,
        collections: HashMap<String, Vec<String>>,
        cameras: HashMap<String, Camera>,
        lights: Vec<Light>,
        environment: Color,
    ) -> Self {
        Self {
            materials,
            objects,
            collections,
            cameras,
            lights,
            environment,
            active_camera: None,
            settings: RenderSettings::default(),
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials
            .iter_mut()
            .find(|material| material.name() == name)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|object| object.name() == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|object| object.name() == name)
    }

    pub fn collection(&self, name: &str) -> Option<&[String]> {
        self.collections.get(name).map(|members| members.as_slice())
    }

    pub fn has_camera(&self, name: &str) -> bool {
        self.cameras.contains_key(name)
    }

    /// Returns false and keeps the current binding when no camera has this name.
    pub fn set_active_camera(&mut self, name: &str) -> bool {
        if self.cameras.contains_key(name) {
            self.active_camera = Some(name.to_owned());
            true
        } else {
            false
        }
    }

    pub fn active_camera(&self) -> Option<&str> {
        self.active_camera.as_deref()
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn view(&self) -> anyhow::Result<SceneView<'_>> {
        let camera = match &self.active_camera {
            Some(name) => match self.cameras.get(name) {
                Some(camera) => camera,
                None => anyhow::bail!(format!("active camera '{}' does not exist", name)),
            },
            None => anyhow::bail!("no active camera is set for the scene"),
        };

        let instances = self
            .objects
            .iter()
            .filter(|object| !object.hide_render)
            .map(|object| {
                Arc::new(Instance::new(
                    object.primitive.clone(),
                    object.trans,
                    object.material,
                ))
            })
            .collect::<Vec<_>>();
        log::debug!(
            "{} of {} objects are visible",
            instances.len(),
            self.objects.len()
        );

        let shading = self
            .materials
            .iter()
            .map(SurfaceShading::from_material)
            .collect();

        Ok(SceneView {
            aggregate: BvhAccel::new(instances, 2),
            shading,
            lights: &self.lights,
            environment: self.environment,
            camera,
        })
    }
}
