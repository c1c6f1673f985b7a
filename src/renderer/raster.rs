use crate::{
    camera::CameraT,
    core::{
        color::Color,
        coord::Coordinate,
        film::{PixelSamples, RenderedImage},
        intersection::Intersection,
        ray::Ray,
        rng::Rng,
        scene::SceneView,
    },
    light::LightT,
    pixel_sampler::{JitteredSampler, PixelSamplerT},
    primitive::PrimitiveT,
};

use super::{util, OutputConfig, RendererT};

/// Preview backend: one bounce of direct light with hard shadows plus a flat
/// environment ambient term, anti-aliased by jittered sub-pixel samples.
pub struct RasterRenderer {
    taa_samples: u32,
}

impl RasterRenderer {
    pub fn new(taa_samples: u32) -> Self {
        Self {
            taa_samples: taa_samples.max(1),
        }
    }

    fn shade(&self, view: &SceneView<'_>, ray: &Ray) -> Option<Color> {
        let mut inter = Intersection::default();
        if !view.aggregate.intersect(ray, &mut inter) {
            return None;
        }

        if cfg!(feature = "debug_normal") {
            let normal_color = Color::new(inter.normal.x, inter.normal.y, inter.normal.z);
            return Some(normal_color * 0.5 + Color::gray(0.5));
        }

        let shading = view.shading[inter.instance?.material()];
        let normal = if ray.direction.dot(inter.normal) > 0.0 {
            -inter.shade_normal
        } else {
            inter.shade_normal
        };
        let coord = Coordinate::from_z(normal);
        let mut wo = coord.to_local(-ray.direction);
        wo.z = wo.z.abs();
        let po = inter.position;

        let mut color = shading.emission + view.environment * shading.bsdf.albedo();
        for light in view.lights {
            let (light_dir, light_strength, dist) = light.illuminate(po);
            let wi = coord.to_local(light_dir);
            if wi.z <= 0.0 {
                continue;
            }
            let mut shadow_ray = Ray::new(po, light_dir);
            shadow_ray.t_min = Ray::T_MIN_EPS / wi.z.max(0.00001);
            if !view.aggregate.intersect_test(&shadow_ray, dist - 0.001) {
                color += light_strength * shading.bsdf.eval(wo, wi) * wi.z;
            }
        }

        Some(color)
    }
}

impl RendererT for RasterRenderer {
    fn render(
        &self,
        view: &SceneView<'_>,
        config: &OutputConfig,
    ) -> anyhow::Result<RenderedImage> {
        let plane = util::ImagePlane::new(config.width, config.height);
        let sampler = JitteredSampler::new(self.taa_samples);
        let film = util::render_bands(config.width, config.height, |i, j, rng: &mut Rng| {
            let mut pixel = PixelSamples::default();
            let mut sampler = sampler;
            sampler.start_pixel();
            while let Some(offset) = sampler.next_sample(rng) {
                let ray = view.camera.generate_ray(plane.point(i, j, offset));
                match self.shade(view, &ray) {
                    Some(color) => pixel.add_hit(color),
                    None => pixel.add_background(view.environment),
                }
            }
            pixel
        })?;

        Ok(film.resolve(config.color_mode))
    }
}
