pub mod batch;
pub mod camera;
pub mod core;
pub mod host;
pub mod light;
pub mod loader;
pub mod material;
pub mod pixel_sampler;
pub mod primitive;
pub mod renderer;
