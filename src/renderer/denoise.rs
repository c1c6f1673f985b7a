use crate::core::film::{pixel_index, RenderedImage};

/// Edge-preserving bilateral filter over the resolved image. Alpha is kept as
/// is and fully transparent pixels neither change nor contribute.
#[derive(Debug, Clone, Copy)]
pub struct BilateralDenoiser {
    spatial_sigma: f32,
    range_sigma: f32,
}

impl BilateralDenoiser {
    pub fn new(strength: f32) -> Self {
        let strength = strength.clamp(0.0, 1.0);
        Self {
            spatial_sigma: 2.0 * strength + 0.5,
            range_sigma: 0.3 * strength + 0.1,
        }
    }

    pub fn denoise(&self, image: &RenderedImage) -> RenderedImage {
        let w = image.width as i32;
        let h = image.height as i32;
        let kernel_radius = (self.spatial_sigma * 2.0).ceil() as i32;
        let spatial_coef = -0.5 / (self.spatial_sigma * self.spatial_sigma);
        let range_coef = -0.5 / (self.range_sigma * self.range_sigma);

        let mut pixels = Vec::with_capacity(image.pixels.len());
        for y in 0..h {
            for x in 0..w {
                let center = image.pixels[pixel_index(image.width, x as u32, y as u32)];
                if center[3] == 0.0 {
                    pixels.push(center);
                    continue;
                }
                let center_tm = tone_map(center);

                let mut sum = [0.0f32; 3];
                let mut weight_sum = 0.0f32;
                for dy in -kernel_radius..=kernel_radius {
                    let ny = y + dy;
                    if ny < 0 || ny >= h {
                        continue;
                    }
                    for dx in -kernel_radius..=kernel_radius {
                        let nx = x + dx;
                        if nx < 0 || nx >= w {
                            continue;
                        }
                        let neighbor = image.pixels[pixel_index(image.width, nx as u32, ny as u32)];
                        if neighbor[3] == 0.0 {
                            continue;
                        }
                        let neighbor_tm = tone_map(neighbor);
                        let range_dist = (0..3)
                            .map(|c| (center_tm[c] - neighbor_tm[c]).powi(2))
                            .sum::<f32>();
                        let spatial_dist = (dx * dx + dy * dy) as f32;
                        let weight =
                            (spatial_dist * spatial_coef + range_dist * range_coef).exp();
                        for c in 0..3 {
                            sum[c] += neighbor[c] * weight;
                        }
                        weight_sum += weight;
                    }
                }

                // the center always contributes with weight 1
                pixels.push([
                    sum[0] / weight_sum,
                    sum[1] / weight_sum,
                    sum[2] / weight_sum,
                    center[3],
                ]);
            }
        }

        RenderedImage {
            width: image.width,
            height: image.height,
            pixels,
        }
    }
}

impl Default for BilateralDenoiser {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn tone_map(pixel: [f32; 4]) -> [f32; 3] {
    let map = |v: f32| {
        let v = v.max(0.0);
        v / (1.0 + v)
    };
    [map(pixel[0]), map(pixel[1]), map(pixel[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32, f: impl Fn(u32, u32) -> [f32; 4]) -> RenderedImage {
        let mut pixels = vec![];
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        RenderedImage {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn flat_image_is_unchanged() {
        let input = image(6, 4, |_, _| [0.5, 0.25, 0.125, 1.0]);
        let output = BilateralDenoiser::default().denoise(&input);
        for (a, b) in input.pixels.iter().zip(output.pixels.iter()) {
            for c in 0..4 {
                assert!((a[c] - b[c]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn alpha_and_transparent_pixels_are_preserved() {
        let input = image(5, 5, |x, _| {
            if x < 2 {
                [0.0, 0.0, 0.0, 0.0]
            } else {
                [0.8, 0.8, 0.8, 0.5]
            }
        });
        let output = BilateralDenoiser::default().denoise(&input);
        assert_eq!(output.pixel(0, 0), [0.0, 0.0, 0.0, 0.0]);
        let p = output.pixel(3, 2);
        assert!((p[0] - 0.8).abs() < 1e-5);
        assert_eq!(p[3], 0.5);
    }

    #[test]
    fn isolated_noise_is_reduced() {
        let input = image(9, 9, |x, y| {
            if (x, y) == (4, 4) {
                [0.6, 0.6, 0.6, 1.0]
            } else {
                [0.5, 0.5, 0.5, 1.0]
            }
        });
        let output = BilateralDenoiser::default().denoise(&input);
        let p = output.pixel(4, 4);
        assert!(p[0] < 0.6);
        assert!(p[0] > 0.5);
    }
}
