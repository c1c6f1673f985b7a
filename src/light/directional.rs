use crate::core::{color::Color, loader::InputParams};

use super::LightT;

pub struct DirLight {
    direction: glam::Vec3A,
    strength: Color,
}

impl DirLight {
    pub fn new(direction: glam::Vec3A, strength: Color) -> Self {
        Self {
            direction: direction.normalize(),
            strength,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let direction: glam::Vec3A = params.get_float3("direction")?.into();
        if direction.length_squared() == 0.0 {
            anyhow::bail!(format!("{}: 'direction' is zero", params.name()));
        }
        let strength = params.get_float3("strength")?;

        Ok(DirLight::new(direction, strength.into()))
    }
}

impl LightT for DirLight {
    fn illuminate(&self, _position: glam::Vec3A) -> (glam::Vec3A, Color, f32) {
        (-self.direction, self.strength, f32::MAX)
    }
}
