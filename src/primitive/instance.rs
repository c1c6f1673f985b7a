use std::sync::Arc;

use crate::core::{bbox::Bbox, intersection::Intersection, ray::Ray, transform::Transform};

use super::{Primitive, PrimitiveT};

/// A placed copy of a shared primitive. `material` indexes the shading table
/// the aggregate was built with.
pub struct Instance {
    primitive: Arc<Primitive>,
    trans: Transform,
    trans_inv: glam::Affine3A,
    bbox: Bbox,
    material: usize,
}

impl Instance {
    pub fn new(primitive: Arc<Primitive>, trans: glam::Affine3A, material: usize) -> Self {
        let trans_inv = trans.inverse();
        let bbox = primitive.bbox().transformed_by(trans);
        Self {
            primitive,
            trans: Transform::new(trans),
            trans_inv,
            bbox,
            material,
        }
    }

    pub fn material(&self) -> usize {
        self.material
    }
}

impl PrimitiveT for Instance {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        let transformed_ray = ray.transformed_by(self.trans_inv);
        self.primitive.intersect_test(&transformed_ray, t_max)
    }

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        let transformed_ray = ray.transformed_by(self.trans_inv);
        if self.primitive.intersect(&transformed_ray, inter) {
            inter.instance = Some(self);
            inter.position = ray.point_at(inter.t);
            inter.normal = self.trans.transform_normal3a(inter.normal);
            inter.shade_normal = self.trans.transform_normal3a(inter.shade_normal);
            true
        } else {
            false
        }
    }

    fn bbox(&self) -> Bbox {
        self.bbox
    }
}
