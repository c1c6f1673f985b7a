use crate::primitive::Instance;

pub struct Intersection<'a> {
    pub t: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub shade_normal: glam::Vec3A,
    pub instance: Option<&'a Instance>,
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self {
            t: f32::MAX,
            position: glam::Vec3A::ZERO,
            normal: glam::Vec3A::Y,
            shade_normal: glam::Vec3A::Y,
            instance: None,
        }
    }
}

impl Intersection<'_> {
    pub fn with_t_max(t_max: f32) -> Self {
        Self {
            t: t_max,
            ..Default::default()
        }
    }
}
