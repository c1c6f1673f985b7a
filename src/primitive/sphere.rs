use crate::core::{bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray};

use super::PrimitiveT;

pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    bbox: Bbox,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32) -> Self {
        let delta = glam::Vec3A::splat(radius);
        let bbox = Bbox::new(center - delta, center + delta);
        Self {
            center,
            radius,
            bbox,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0])?;
        let radius = params.get_float("radius")?;
        if radius <= 0.0 {
            anyhow::bail!(format!("{}: radius should be positive", params.name()));
        }

        Ok(Sphere::new(center.into(), radius))
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = b * b - a * c;
        if delta >= 0.0 {
            let delta = delta.sqrt();
            Some(((-b - delta) / a, (-b + delta) / a))
        } else {
            None
        }
    }
}

impl PrimitiveT for Sphere {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if let Some((min, max)) = self.intersect_ray(ray) {
            (min > ray.t_min && min < t_max) || (max > ray.t_min && max < t_max)
        } else {
            false
        }
    }

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        if let Some((min, max)) = self.intersect_ray(ray) {
            let t = if min > ray.t_min { min } else { max };
            if ray.t_min < t && t < inter.t {
                let normal = (ray.point_at(t) - self.center) / self.radius;
                inter.t = t;
                inter.normal = normal;
                inter.shade_normal = normal;
                return true;
            }
        }
        false
    }

    fn bbox(&self) -> Bbox {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_front_face() {
        let sphere = Sphere::new(glam::Vec3A::ZERO, 1.0);
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 5.0), -glam::Vec3A::Z);
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 4.0).abs() < 1e-5);
        assert!((inter.normal - glam::Vec3A::Z).length() < 1e-5);
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let sphere = Sphere::new(glam::Vec3A::ZERO, 2.0);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X);
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 2.0).abs() < 1e-5);
        assert!(sphere.intersect_test(&ray, 3.0));
        assert!(!sphere.intersect_test(&ray, 1.0));
    }
}
