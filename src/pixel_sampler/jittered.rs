use crate::core::rng::Rng;

use super::PixelSamplerT;

const ONE_MINUS_EPSILON: f32 = 0.999_999_9;

/// Stratified samples over a near-square grid. When `spp` is not a product of
/// the grid sides the last row is left partially filled.
#[derive(Clone, Copy)]
pub struct JitteredSampler {
    spp: u32,
    division_x: u32,
    division_x_inv: f32,
    division_y_inv: f32,
    curr_index: u32,
}

impl JitteredSampler {
    pub fn new(spp: u32) -> Self {
        let spp = spp.max(1);
        let division_x = ((spp as f32).sqrt().round() as u32).max(1);
        let division_y = (spp + division_x - 1) / division_x;
        Self {
            spp,
            division_x,
            division_x_inv: 1.0 / division_x as f32,
            division_y_inv: 1.0 / division_y as f32,
            curr_index: 0,
        }
    }
}

impl PixelSamplerT for JitteredSampler {
    fn spp(&self) -> u32 {
        self.spp
    }

    fn start_pixel(&mut self) {
        self.curr_index = 0;
    }

    fn next_sample(&mut self, rng: &mut Rng) -> Option<(f32, f32)> {
        if self.curr_index == self.spp {
            return None;
        }
        let ind_x = self.curr_index % self.division_x;
        let ind_y = self.curr_index / self.division_x;
        self.curr_index += 1;
        let (rand_x, rand_y) = rng.uniform_2d();
        Some((
            ((ind_x as f32 + rand_x) * self.division_x_inv).min(ONE_MINUS_EPSILON),
            ((ind_y as f32 + rand_y) * self.division_y_inv).min(ONE_MINUS_EPSILON),
        ))
    }
}
