use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    PathTraced,
    Raster,
}

impl Engine {
    /// Only `"path"` selects the path tracer, anything else falls back to raster.
    pub fn from_name(name: &str) -> Self {
        match name {
            "path" => Engine::PathTraced,
            _ => Engine::Raster,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSet {
    Supported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    #[serde(rename = "exr")]
    OpenExr,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::OpenExr => "exr",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgba,
    Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathTracedSettings {
    pub samples: u32,
    pub use_denoising: bool,
    pub use_adaptive_sampling: bool,
    pub feature_set: FeatureSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterSettings {
    pub taa_render_samples: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub file_format: ImageFormat,
    pub color_mode: ColorMode,
}

/// Scene-level render state, mutated by the batch configurators before each render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub engine: Engine,
    pub path_traced: PathTracedSettings,
    pub raster: RasterSettings,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub image: ImageSettings,
    pub filepath: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            engine: Engine::Raster,
            path_traced: PathTracedSettings {
                samples: 128,
                use_denoising: false,
                use_adaptive_sampling: false,
                feature_set: FeatureSet::Supported,
            },
            raster: RasterSettings {
                taa_render_samples: 16,
            },
            resolution_x: 1920,
            resolution_y: 1080,
            image: ImageSettings {
                file_format: ImageFormat::Png,
                color_mode: ColorMode::Rgba,
            },
            filepath: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names() {
        assert_eq!(Engine::from_name("path"), Engine::PathTraced);
        assert_eq!(Engine::from_name("raster"), Engine::Raster);
        assert_eq!(Engine::from_name("PATH"), Engine::Raster);
        assert_eq!(Engine::from_name("unknown"), Engine::Raster);
    }

    #[test]
    fn format_extensions() {
        assert_eq!(ImageFormat::default().extension(), "png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::OpenExr.extension(), "exr");
    }
}
