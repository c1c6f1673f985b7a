use crate::{
    core::settings::{Engine, FeatureSet},
    host::Host,
};

/// Selects the render backend by name and sets its sample count. Only
/// `"path"` selects the path tracer, every other name gets the raster backend.
pub fn set_engine<H: Host + ?Sized>(host: &mut H, name: &str, samples: u32) -> Engine {
    let engine = Engine::from_name(name);
    let settings = host.settings_mut();
    settings.engine = engine;
    match engine {
        Engine::PathTraced => {
            settings.path_traced.samples = samples;
            settings.path_traced.use_denoising = true;
            settings.path_traced.feature_set = FeatureSet::Supported;
            settings.path_traced.use_adaptive_sampling = true;
        }
        Engine::Raster => {
            settings.raster.taa_render_samples = samples;
        }
    }
    log::info!("engine {:?} with {} samples", engine, samples);
    engine
}
