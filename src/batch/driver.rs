use std::path::{Path, PathBuf};

use crate::{core::settings::ImageFormat, host::Host};

use super::{render_angle, set_engine, set_paint, set_wheels, RenderConfig, RenderOptions};

#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub engine: String,
    pub samples: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            engine: "raster".to_owned(),
            samples: 64,
            width: 2048,
            height: 1152,
        }
    }
}

/// `{out_dir}/{slug}_{angle}.{ext}`
pub fn output_path(out_dir: &Path, slug: &str, angle: &str, format: ImageFormat) -> PathBuf {
    out_dir.join(format!("{}_{}.{}", slug, angle, format.extension()))
}

/// Configures the engine once, then for every variant in order applies paint
/// and wheels and renders every angle in order. Stops at the first error.
pub fn run<H: Host + ?Sized>(
    host: &mut H,
    config: &RenderConfig,
    options: &DriverOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    set_engine(host, &options.engine, options.samples);

    let render_options = RenderOptions {
        resolution: (options.width, options.height),
        format: config.format,
        ..Default::default()
    };

    let mut outputs = Vec::with_capacity(config.variants.len() * config.angles.len());
    for variant in &config.variants {
        log::info!("variant '{}'", variant.slug);
        let painted = set_paint(host, &variant.color)?;
        log::debug!("{} paint materials updated", painted);
        if let Some(wheels) = variant.wheel_selection() {
            set_wheels(host, wheels);
        }

        for angle in &config.angles {
            let output = output_path(&config.out_dir, &variant.slug, angle, config.format);
            render_angle(host, angle, &output, &render_options)?;
            outputs.push(output);
        }
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        batch::{BatchError, VariantSpec},
        core::{color::Color, settings::Engine},
        host::fake::FakeHost,
        material::{Material, NodeValue, ShaderNode},
    };

    fn variant(slug: &str, color: &str, wheels: Option<&str>) -> VariantSpec {
        VariantSpec {
            slug: slug.to_owned(),
            color: color.to_owned(),
            wheels: wheels.map(str::to_owned),
        }
    }

    fn garage_host() -> FakeHost {
        let mut host = FakeHost::with_objects(&["body", "WHEELS_SPORT", "WHEELS_OFFROAD"]);
        host.cameras = vec!["front".to_owned(), "side".to_owned(), "rear".to_owned()];
        host.materials = vec![Material::new(
            "PAINT_body",
            true,
            Color::gray(0.8),
            vec![ShaderNode::principled("principled")],
        )];
        host
    }

    fn small() -> DriverOptions {
        DriverOptions {
            width: 32,
            height: 18,
            ..Default::default()
        }
    }

    #[test]
    fn output_path_is_deterministic() {
        assert_eq!(
            output_path(Path::new("/out"), "red", "front", ImageFormat::Png),
            PathBuf::from("/out/red_front.png")
        );
        assert_eq!(
            output_path(Path::new("/out"), "red", "front", ImageFormat::OpenExr),
            PathBuf::from("/out/red_front.exr")
        );
    }

    #[test]
    fn renders_every_variant_and_angle_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            variants: vec![
                variant("red", "#ff0000", Some("SPORT")),
                variant("blue", "#0000ff", Some("OFFROAD")),
            ],
            angles: vec!["front".to_owned(), "side".to_owned(), "rear".to_owned()],
            out_dir: dir.path().join("renders"),
            format: ImageFormat::Png,
        };
        let mut host = garage_host();

        let outputs = run(&mut host, &config, &small()).unwrap();

        assert_eq!(outputs.len(), 6);
        assert_eq!(host.renders.len(), 6);
        let distinct = outputs.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), 6);
        assert_eq!(outputs[0], dir.path().join("renders").join("red_front.png"));
        assert_eq!(outputs[5], dir.path().join("renders").join("blue_rear.png"));
        let cameras = host
            .renders
            .iter()
            .map(|call| call.camera.clone().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(cameras, vec!["front", "side", "rear", "front", "side", "rear"]);
        assert!(outputs.iter().all(|path| path.exists()));

        // the last variant's state stays applied
        assert!(host.is_hidden("WHEELS_SPORT"));
        assert!(!host.is_hidden("WHEELS_OFFROAD"));
        let node = host.materials[0].node("principled").unwrap();
        assert_eq!(
            node.input(ShaderNode::BASE_COLOR),
            Some(NodeValue::Color([0.0, 0.0, 1.0, 1.0]))
        );
        assert_eq!(host.renders[0].settings.resolution_x, 32);
        assert_eq!(host.renders[0].settings.engine, Engine::Raster);
        assert_eq!(host.renders[0].settings.raster.taa_render_samples, 64);
    }

    #[test]
    fn variant_without_wheels_keeps_visibility() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            variants: vec![variant("base", "#ffffff", None), variant("plain", "#ffffff", Some(""))],
            angles: vec!["front".to_owned()],
            out_dir: dir.path().to_path_buf(),
            format: ImageFormat::Png,
        };
        let mut host = garage_host();
        host.set_hide_render("WHEELS_SPORT", true);

        run(&mut host, &config, &small()).unwrap();
        assert!(host.is_hidden("WHEELS_SPORT"));
        assert!(!host.is_hidden("WHEELS_OFFROAD"));
    }

    #[test]
    fn missing_camera_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            variants: vec![variant("red", "#ff0000", None), variant("blue", "#0000ff", None)],
            angles: vec!["front".to_owned(), "top".to_owned(), "side".to_owned()],
            out_dir: dir.path().to_path_buf(),
            format: ImageFormat::Png,
        };
        let mut host = garage_host();

        let err = run(&mut host, &config, &small()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::CameraNotFound(_))
        ));
        assert_eq!(host.renders.len(), 1);
        assert!(!dir.path().join("red_top.png").exists());
        assert!(!dir.path().join("red_side.png").exists());
    }

    #[test]
    fn path_engine_applies_once_for_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            variants: vec![variant("red", "#ff0000", None)],
            angles: vec!["front".to_owned()],
            out_dir: dir.path().to_path_buf(),
            format: ImageFormat::Png,
        };
        let options = DriverOptions {
            engine: "path".to_owned(),
            samples: 128,
            ..small()
        };
        let mut host = garage_host();

        run(&mut host, &config, &options).unwrap();
        let settings = &host.renders[0].settings;
        assert_eq!(settings.engine, Engine::PathTraced);
        assert_eq!(settings.path_traced.samples, 128);
    }
}
