use crate::core::{
    film::{Film, PixelSamples},
    rng::Rng,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageRange {
    pub from: u32,
    pub to: u32,
}

/// Splits `height` rows into `num_thread` bands, the last band takes the remainder.
pub fn create_image_ranges(num_thread: u32, height: u32) -> Vec<ImageRange> {
    let num_thread = num_thread.clamp(1, height.max(1));
    let height_per_cpu = height / num_thread;
    let mut ranges = Vec::with_capacity(num_thread as usize);
    for t in 0..num_thread {
        let from = t * height_per_cpu;
        let to = if t + 1 == num_thread {
            height
        } else {
            (t + 1) * height_per_cpu
        };
        ranges.push(ImageRange { from, to });
    }
    ranges
}

pub fn render_progress_bar(width: u32, height: u32) -> indicatif::ProgressBar {
    let progress_bar = indicatif::ProgressBar::new(width as u64 * height as u64);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
            .progress_chars("#>-"),
    );
    progress_bar
}

/// Maps a pixel and a sub-pixel offset to the camera's image plane.
#[derive(Copy, Clone)]
pub struct ImagePlane {
    width_inv: f32,
    height_inv: f32,
    aspect: f32,
    height: u32,
}

impl ImagePlane {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width_inv: 1.0 / width as f32,
            height_inv: 1.0 / height as f32,
            aspect: width as f32 / height as f32,
            height,
        }
    }

    pub fn point(&self, i: u32, j: u32, offset: (f32, f32)) -> (f32, f32) {
        let x = ((i as f32 + offset.0) * self.width_inv - 0.5) * self.aspect;
        let y = ((self.height - j - 1) as f32 + offset.1) * self.height_inv - 0.5;
        (x, y)
    }
}

/// Renders every pixel with `shade_pixel` on `num_cpus * 2` scoped threads, one
/// band of rows per thread.
pub fn render_bands<F>(width: u32, height: u32, shade_pixel: F) -> anyhow::Result<Film>
where
    F: Fn(u32, u32, &mut Rng) -> PixelSamples + Sync,
{
    let mut film = Film::new(width, height);
    let progress_bar = render_progress_bar(width, height);

    let num_cpus = num_cpus::get() as u32 * 2;
    let ranges = create_image_ranges(num_cpus, height);

    let bands = crossbeam::scope(|scope| {
        let handles = ranges
            .iter()
            .map(|&ImageRange { from, to }| {
                let progress_bar = progress_bar.clone();
                let shade_pixel = &shade_pixel;
                scope.spawn(move |_| {
                    let mut rng = Rng::new();
                    let mut rows = Vec::with_capacity((to - from) as usize * width as usize);
                    for j in from..to {
                        for i in 0..width {
                            rows.push(shade_pixel(i, j, &mut rng));
                        }
                        progress_bar.inc(width as u64);
                    }
                    (from, rows)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| anyhow::anyhow!("render worker panicked"))?;

    for band in bands {
        let (from, rows) = band.map_err(|_| anyhow::anyhow!("render worker panicked"))?;
        film.set_rows(from, rows);
    }
    progress_bar.finish_and_clear();

    Ok(film)
}
