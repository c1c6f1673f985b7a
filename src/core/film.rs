use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::core::{
    color::Color,
    settings::{ColorMode, ImageFormat},
};

/// Accumulated samples of one pixel. Hits and background samples are kept apart
/// so the same film resolves to a transparent or an opaque image.
#[derive(Copy, Clone, Debug, Default)]
pub struct PixelSamples {
    surface: Color,
    background: Color,
    hits: u32,
    count: u32,
}

impl PixelSamples {
    pub fn add_hit(&mut self, color: Color) {
        self.surface += color;
        self.hits += 1;
        self.count += 1;
    }

    pub fn add_background(&mut self, color: Color) {
        self.background += color;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn coverage(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.hits as f32 / self.count as f32
        }
    }

    /// Straight (not premultiplied) color plus coverage alpha.
    pub fn resolve_rgba(&self) -> [f32; 4] {
        if self.hits == 0 {
            return [0.0, 0.0, 0.0, 0.0];
        }
        let color = self.surface / self.hits as f32;
        [color.r, color.g, color.b, self.coverage()]
    }

    pub fn resolve_rgb(&self) -> [f32; 4] {
        if self.count == 0 {
            return [0.0, 0.0, 0.0, 1.0];
        }
        let color = (self.surface + self.background) / self.count as f32;
        [color.r, color.g, color.b, 1.0]
    }
}

/// Row-major index of pixel `(x, y)`, computed in `usize` so large images do not wrap.
pub fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<PixelSamples>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = vec![PixelSamples::default(); width as usize * height as usize];
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> &PixelSamples {
        &self.pixels[self.index_of(x, y)]
    }

    /// Copies a band of whole rows starting at `from_row`.
    pub fn set_rows(&mut self, from_row: u32, rows: Vec<PixelSamples>) {
        let start = self.index_of(0, from_row);
        let end = start + rows.len();
        self.pixels[start..end].copy_from_slice(&rows);
    }

    pub fn resolve(&self, color_mode: ColorMode) -> RenderedImage {
        let pixels = self
            .pixels
            .iter()
            .map(|pixel| match color_mode {
                ColorMode::Rgba => pixel.resolve_rgba(),
                ColorMode::Rgb => pixel.resolve_rgb(),
            })
            .collect();
        RenderedImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        pixel_index(self.width, x, y)
    }
}

/// Linear float RGBA image, row-major from the top-left corner.
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 4]>,
}

impl RenderedImage {
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[pixel_index(self.width, x, y)]
    }

    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        format: ImageFormat,
        color_mode: ColorMode,
    ) -> anyhow::Result<()> {
        let path = path.as_ref();
        match format {
            ImageFormat::Png if color_mode == ColorMode::Rgba => self
                .to_rgba8()
                .save_with_format(path, image::ImageFormat::Png)
                .context(format!("can't write image '{}'", path.display())),
            ImageFormat::Png => self
                .to_rgb8()
                .save_with_format(path, image::ImageFormat::Png)
                .context(format!("can't write image '{}'", path.display())),
            ImageFormat::Jpeg => {
                if color_mode == ColorMode::Rgba {
                    log::warn!("jpeg has no alpha channel, writing '{}' as RGB", path.display());
                }
                self.to_rgb8()
                    .save_with_format(path, image::ImageFormat::Jpeg)
                    .context(format!("can't write image '{}'", path.display()))
            }
            ImageFormat::OpenExr => {
                exr::prelude::write_rgba_file(
                    path,
                    self.width as usize,
                    self.height as usize,
                    |x, y| {
                        let [r, g, b, a] = self.pixels[y * self.width as usize + x];
                        (r, g, b, a)
                    },
                )
                .context(format!("can't write image '{}'", path.display()))
            }
        }
    }

    fn to_rgba8(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let [r, g, b, a] = self.pixel(x, y);
            *pixel = Rgba([
                Color::linear_to_srgb8(r),
                Color::linear_to_srgb8(g),
                Color::linear_to_srgb8(b),
                (a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
            ]);
        }
        image
    }

    fn to_rgb8(&self) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let [r, g, b, _] = self.pixel(x, y);
            *pixel = Rgb([
                Color::linear_to_srgb8(r),
                Color::linear_to_srgb8(g),
                Color::linear_to_srgb8(b),
            ]);
        }
        image
    }
}
