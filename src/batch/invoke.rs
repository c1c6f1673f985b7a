use std::path::Path;

use anyhow::Context;

use crate::{
    core::settings::{ColorMode, ImageFormat},
    host::Host,
};

use super::BatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub resolution: (u32, u32),
    pub format: ImageFormat,
    pub alpha: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            resolution: (2048, 1152),
            format: ImageFormat::Png,
            alpha: true,
        }
    }
}

/// Binds `camera`, applies the output settings and renders one still to
/// `output`, creating missing parent directories. Fails with
/// [`BatchError::CameraNotFound`] before touching anything else.
pub fn render_angle<H: Host + ?Sized>(
    host: &mut H,
    camera: &str,
    output: &Path,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    if !host.has_camera(camera) || !host.set_camera(camera) {
        return Err(BatchError::CameraNotFound(camera.to_owned()).into());
    }

    let settings = host.settings_mut();
    settings.resolution_x = options.resolution.0;
    settings.resolution_y = options.resolution.1;
    settings.image.file_format = options.format;
    settings.image.color_mode = if options.alpha {
        ColorMode::Rgba
    } else {
        ColorMode::Rgb
    };
    settings.filepath = output.to_path_buf();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("can't create directory '{}'", parent.display()))?;
    }

    log::info!("rendering camera '{}' to '{}'", camera, output.display());
    host.render_still()
        .context(format!("rendering '{}' failed", output.display()))
}
