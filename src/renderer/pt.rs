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
    pixel_sampler::{PixelSamplerT, RandomSampler},
    primitive::PrimitiveT,
};

use super::{util, BilateralDenoiser, OutputConfig, RendererT};

pub struct PathTracer {
    max_depth: u32,
    samples: u32,
    adaptive_sampling: bool,
    denoiser: Option<BilateralDenoiser>,
}

impl PathTracer {
    pub const MAX_DEPTH: u32 = 8;
    const ADAPTIVE_THRESHOLD: f32 = 0.01;

    pub fn new(max_depth: u32, samples: u32, adaptive_sampling: bool, denoising: bool) -> Self {
        Self {
            max_depth,
            samples: samples.max(1),
            adaptive_sampling,
            denoiser: if denoising {
                Some(BilateralDenoiser::default())
            } else {
                None
            },
        }
    }

    fn min_samples(&self) -> u32 {
        (self.samples / 8).max(4).min(self.samples)
    }

    fn render_pixel(
        &self,
        view: &SceneView<'_>,
        plane: &util::ImagePlane,
        i: u32,
        j: u32,
        rng: &mut Rng,
    ) -> PixelSamples {
        let mut pixel = PixelSamples::default();
        let mut sampler = RandomSampler::new(self.samples);
        let min_samples = self.min_samples();
        let mut lum_sum = 0.0f64;
        let mut lum_sqr_sum = 0.0f64;

        sampler.start_pixel();
        while let Some(offset) = sampler.next_sample(rng) {
            let ray = view.camera.generate_ray(plane.point(i, j, offset));
            let color = match self.trace_ray(view, ray, rng) {
                Some(color) => {
                    pixel.add_hit(color);
                    color
                }
                None => {
                    pixel.add_background(view.environment);
                    view.environment
                }
            };

            let lum = color.luminance() as f64;
            lum_sum += lum;
            lum_sqr_sum += lum * lum;
            let n = pixel.count();
            if self.adaptive_sampling && n >= min_samples && converged(lum_sum, lum_sqr_sum, n) {
                break;
            }
        }

        pixel
    }

    /// `None` when the camera ray escapes the scene.
    fn trace_ray(&self, view: &SceneView<'_>, mut ray: Ray, rng: &mut Rng) -> Option<Color> {
        let mut final_color = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut curr_depth = 0;

        while curr_depth < self.max_depth {
            let mut inter = Intersection::default();
            if !view.aggregate.intersect(&ray, &mut inter) {
                if curr_depth == 0 {
                    return None;
                }
                final_color += throughput * view.environment;
                break;
            }

            if cfg!(feature = "debug_normal") {
                let normal_color = Color::new(inter.normal.x, inter.normal.y, inter.normal.z);
                return Some(normal_color * 0.5 + Color::gray(0.5));
            }

            let shading = match inter.instance {
                Some(instance) => view.shading[instance.material()],
                None => break,
            };
            final_color += throughput * shading.emission;

            let po = inter.position;
            let (normal, shade_normal) = if ray.direction.dot(inter.normal) > 0.0 {
                (-inter.normal, -inter.shade_normal)
            } else {
                (inter.normal, inter.shade_normal)
            };
            let shade_normal = if shade_normal.dot(normal) > 0.0 {
                shade_normal
            } else {
                normal
            };
            let coord_po = Coordinate::from_z(shade_normal);
            let wo = coord_po.to_local(-ray.direction);
            if wo.z <= 0.0 {
                break;
            }

            let mut li = Color::BLACK;
            for light in view.lights {
                let (light_dir, light_strength, dist) = light.illuminate(po);
                let wi = coord_po.to_local(light_dir);
                if wi.z <= 0.0 || light_dir.dot(normal) <= 0.0 {
                    continue;
                }
                let mut shadow_ray = Ray::new(po, light_dir);
                shadow_ray.t_min = Ray::T_MIN_EPS / wi.z.max(0.00001);
                if !view.aggregate.intersect_test(&shadow_ray, dist - 0.001) {
                    li += light_strength * shading.bsdf.eval(wo, wi) * wi.z;
                }
            }
            final_color += throughput * li;

            let samp = match shading.bsdf.sample(wo, rng) {
                Some(samp) => samp,
                None => break,
            };
            let wi_world = coord_po.to_world(samp.wi);
            if wi_world.dot(normal) <= 0.0 {
                break;
            }
            ray = Ray::new(po, wi_world);
            ray.t_min = Ray::T_MIN_EPS / samp.wi.z.max(0.00001);
            throughput *= samp.bsdf * (samp.wi.z / samp.pdf);

            if !throughput.is_finite() {
                break;
            }

            let rr_rand = rng.uniform_1d();
            let rr_prop = throughput.luminance().clamp(0.001, 0.95);
            if rr_rand > rr_prop {
                break;
            }
            throughput /= rr_prop;

            curr_depth += 1;
        }

        Some(final_color)
    }
}

/// Relative standard error of the mean luminance below the threshold. Black
/// pixels converge once their variance is zero.
fn converged(lum_sum: f64, lum_sqr_sum: f64, n: u32) -> bool {
    let n = n as f64;
    let mean = lum_sum / n;
    let variance = (lum_sqr_sum / n - mean * mean).max(0.0);
    let std_error = (variance / n).sqrt();
    if mean <= 1e-6 {
        std_error <= 1e-6
    } else {
        std_error / mean < PathTracer::ADAPTIVE_THRESHOLD as f64
    }
}

impl RendererT for PathTracer {
    fn render(
        &self,
        view: &SceneView<'_>,
        config: &OutputConfig,
    ) -> anyhow::Result<RenderedImage> {
        let plane = util::ImagePlane::new(config.width, config.height);
        let film = util::render_bands(config.width, config.height, |i, j, rng| {
            self.render_pixel(view, &plane, i, j, rng)
        })?;

        let image = film.resolve(config.color_mode);
        Ok(match &self.denoiser {
            Some(denoiser) => denoiser.denoise(&image),
            None => image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_samples_before_adaptive_stop() {
        assert_eq!(PathTracer::new(8, 64, true, false).min_samples(), 8);
        assert_eq!(PathTracer::new(8, 16, true, false).min_samples(), 4);
        assert_eq!(PathTracer::new(8, 2, true, false).min_samples(), 2);
    }

    #[test]
    fn convergence_test() {
        // constant luminance has no error
        assert!(converged(8.0 * 0.5, 8.0 * 0.25, 8));
        // half black, half white is far from converged
        assert!(!converged(4.0, 4.0, 8));
        assert!(converged(0.0, 0.0, 4));
    }
}
