use crate::core::{color::Color, loader::InputParams};

use super::LightT;

pub struct PointLight {
    position: glam::Vec3A,
    strength: Color,
}

impl PointLight {
    pub fn new(position: glam::Vec3A, strength: Color) -> Self {
        Self { position, strength }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let position = params.get_float3("position")?;
        let strength = params.get_float3("strength")?;

        Ok(PointLight::new(position.into(), strength.into()))
    }
}

impl LightT for PointLight {
    fn illuminate(&self, position: glam::Vec3A) -> (glam::Vec3A, Color, f32) {
        let dir = self.position - position;
        let dist_sqr = dir.length_squared().max(1e-8);
        let dist = dist_sqr.sqrt();
        (dir / dist, self.strength / dist_sqr, dist)
    }
}
