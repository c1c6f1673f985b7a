mod jittered;
mod random;

pub use jittered::*;
pub use random::*;

use crate::core::rng::Rng;

/// Sub-pixel sample positions, each component in `[0, 1)`.
#[enum_dispatch::enum_dispatch(PixelSampler)]
pub trait PixelSamplerT: Send + Sync + Clone + Copy {
    fn spp(&self) -> u32;

    fn start_pixel(&mut self);

    fn next_sample(&mut self, rng: &mut Rng) -> Option<(f32, f32)>;
}

#[enum_dispatch::enum_dispatch]
#[derive(Clone, Copy)]
pub enum PixelSampler {
    RandomSampler,
    JitteredSampler,
}
