use std::path::PathBuf;

use structopt::StructOpt;
use variant_render::{
    batch::{self, DriverOptions, RenderConfig},
    host::SceneHost,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "variant-render", about = "Renders every variant of a scene from every camera angle")]
struct Opt {
    /// Variant list, camera angles and output directory
    #[structopt(long, parse(from_os_str))]
    config: PathBuf,

    #[structopt(long, parse(from_os_str))]
    scene: PathBuf,

    /// `path` for the path tracer, anything else renders with the raster backend
    #[structopt(long, default_value = "raster")]
    engine: String,

    #[structopt(long, default_value = "64")]
    samples: u32,

    #[structopt(long, default_value = "2048")]
    width: u32,

    #[structopt(long, default_value = "1152")]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    let config = RenderConfig::load(&opt.config)?;
    log::info!(
        "{} variants x {} angles into '{}'",
        config.variants.len(),
        config.angles.len(),
        config.out_dir.display()
    );

    let mut host = SceneHost::load(&opt.scene)?;

    let begin_time = std::time::SystemTime::now();
    let outputs = batch::run(
        &mut host,
        &config,
        &DriverOptions {
            engine: opt.engine,
            samples: opt.samples,
            width: opt.width,
            height: opt.height,
        },
    )?;
    let duration = std::time::SystemTime::now().duration_since(begin_time)?;

    log::info!("Finished {} renders, time used: {:?}", outputs.len(), duration);
    Ok(())
}
