mod directional;
mod point;

pub use directional::*;
pub use point::*;

use crate::core::{color::Color, loader::InputParams, scene_resources::SceneResources};

#[enum_dispatch::enum_dispatch(Light)]
pub trait LightT: Send + Sync {
    /// return (direction to the light, incident radiance, light dist)
    fn illuminate(&self, position: glam::Vec3A) -> (glam::Vec3A, Color, f32);
}

#[enum_dispatch::enum_dispatch]
pub enum Light {
    DirLight,
    PointLight,
}

pub fn create_light_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("light".into());
    let ty = params.get_str("type")?;
    let name = params.get_str("name")?;
    params.set_name(format!("light-{}-{}", ty, name).into());

    let res = match ty.as_str() {
        "directional" => DirLight::load(params)?.into(),
        "point" => PointLight::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.add_light(name, res)?;

    params.check_unused_keys();

    Ok(())
}
