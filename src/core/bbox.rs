use crate::core::ray::Ray;

#[derive(Copy, Clone, Debug)]
pub struct Bbox {
    pub p_min: glam::Vec3A,
    pub p_max: glam::Vec3A,
}

impl Bbox {
    pub fn new(p_min: glam::Vec3A, p_max: glam::Vec3A) -> Self {
        Self { p_min, p_max }
    }

    pub fn empty() -> Self {
        Self {
            p_min: glam::Vec3A::splat(f32::MAX),
            p_max: glam::Vec3A::splat(f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    pub fn merge(self, another: Bbox) -> Self {
        Self {
            p_min: self.p_min.min(another.p_min),
            p_max: self.p_max.max(another.p_max),
        }
    }

    pub fn merge_point(self, p: glam::Vec3A) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    pub fn transformed_by(self, trans: glam::Affine3A) -> Self {
        if self.is_empty() {
            return self;
        }
        let mut result = Bbox::empty();
        for i in 0..8 {
            let corner = glam::Vec3A::new(
                if i & 1 == 0 { self.p_min.x } else { self.p_max.x },
                if i & 2 == 0 { self.p_min.y } else { self.p_max.y },
                if i & 4 == 0 { self.p_min.z } else { self.p_max.z },
            );
            result = result.merge_point(trans.transform_point3a(corner));
        }
        result
    }

    pub fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if self.is_empty() {
            return false;
        }

        let inv_dir = glam::Vec3A::ONE / ray.direction;
        let t0 = (self.p_min - ray.origin) * inv_dir;
        let t1 = (self.p_max - ray.origin) * inv_dir;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        t_near <= t_far && t_far > ray.t_min && t_near < t_max
    }

    pub fn centroid(&self) -> glam::Vec3A {
        (self.p_min + self.p_max) * 0.5
    }

    pub fn largest_axis(&self) -> usize {
        let diff = self.p_max - self.p_min;
        if diff.x >= diff.y && diff.x >= diff.z {
            0
        } else if diff.y >= diff.z {
            1
        } else {
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_box_in_front() {
        let bbox = Bbox::new(glam::Vec3A::splat(-1.0), glam::Vec3A::splat(1.0));
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, -5.0), glam::Vec3A::Z);
        assert!(bbox.intersect_test(&ray, f32::MAX));
        assert!(!bbox.intersect_test(&ray, 3.0));
    }

    #[test]
    fn ray_misses_box_behind() {
        let bbox = Bbox::new(glam::Vec3A::splat(-1.0), glam::Vec3A::splat(1.0));
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 5.0), glam::Vec3A::Z);
        assert!(!bbox.intersect_test(&ray, f32::MAX));
    }

    #[test]
    fn translated_box_moves_with_transform() {
        let bbox = Bbox::new(glam::Vec3A::splat(-1.0), glam::Vec3A::splat(1.0));
        let moved =
            bbox.transformed_by(glam::Affine3A::from_translation(glam::Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(moved.p_min, glam::Vec3A::new(1.0, -1.0, -1.0));
        assert_eq!(moved.p_max, glam::Vec3A::new(3.0, 1.0, 1.0));
    }
}
