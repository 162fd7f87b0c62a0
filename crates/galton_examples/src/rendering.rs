use std::path::Path;

use galton::prelude::*;
use glam::Vec2;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

const BLUE: [u8; 3] = [88, 196, 221];
const RED: [u8; 3] = [252, 98, 85];

/// Image size, visible world window and colors.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub world_min: Vec2,
    pub world_max: Vec2,
    pub background: [u8; 3],
    pub wall_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub path_color: Option<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_min: Vec2, world_max: Vec2) -> Self {
        Self {
            image_size,
            world_min,
            world_max,
            background: [20, 20, 24],
            wall_color: [128, 128, 128],
            ball_color: BLUE,
            path_color: None,
        }
    }

    /// Window covering the whole board with a small margin.
    pub fn fit_board(board: &Board, image_size: (u32, u32)) -> Self {
        let (left, right) = board.floor_span();
        let top = board.start_position().y + board.ball_radius();
        let bottom = board.bin_floor_y();
        let margin = 0.05 * (right - left).max(top - bottom);
        Self::new(
            image_size,
            Vec2::new(left - margin, bottom - margin),
            Vec2::new(right + margin, top + margin),
        )
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_ball_color(mut self, color: [u8; 3]) -> Self {
        self.ball_color = color;
        self
    }

    /// Draws every particle's path in `color` beneath the balls.
    pub fn with_paths(mut self, color: [u8; 3]) -> Self {
        self.path_color = Some(color);
        self
    }

    fn to_pixel(&self, p: Vec2) -> Vec2 {
        let (w, h) = self.image_size;
        let span = self.world_max - self.world_min;
        Vec2::new(
            (p.x - self.world_min.x) / span.x * w as f32,
            (self.world_max.y - p.y) / span.y * h as f32,
        )
    }

    fn pixels_per_unit(&self) -> f32 {
        self.image_size.0 as f32 / (self.world_max.x - self.world_min.x)
    }
}

/// Renders pegs, bins, paths and stacked balls of one batch.
pub fn render_batch_to_png(
    board: &Board,
    rule: &BranchRule,
    result: &BatchResult,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero");
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    let peg_radius = (0.05 * rc.pixels_per_unit()).max(1.0);
    for peg in board.pegs() {
        let bias = rule.peg_bias(peg.row, peg.col);
        let color = lerp_color(BLUE, RED, bias.probability as f32);
        fill_circle(&mut img, rc.to_pixel(peg.position), peg_radius, color);
    }

    let top = board.bin_top_y();
    let floor = board.bin_floor_y();
    for x in board.bin_dividers() {
        draw_line(
            &mut img,
            rc.to_pixel(Vec2::new(x, top)),
            rc.to_pixel(Vec2::new(x, floor)),
            rc.wall_color,
        );
    }
    let (left, right) = board.floor_span();
    draw_line(
        &mut img,
        rc.to_pixel(Vec2::new(left, floor)),
        rc.to_pixel(Vec2::new(right, floor)),
        rc.wall_color,
    );

    if let Some(color) = rc.path_color {
        for (path, _) in result.landings() {
            for seg in path.windows(2) {
                draw_line(&mut img, rc.to_pixel(seg[0]), rc.to_pixel(seg[1]), color);
            }
        }
    }

    let ball_radius = (board.ball_radius() * rc.pixels_per_unit()).max(1.0);
    for (_, resting) in result.landings() {
        fill_circle(&mut img, rc.to_pixel(resting), ball_radius, rc.ball_color);
    }

    img.save(path.as_ref())?;
    Ok(())
}

/// Bar chart of `histogram`, with optional expected frequencies drawn as markers.
pub fn render_histogram_to_png(
    histogram: &Histogram,
    expected: Option<&[f64]>,
    image_size: (u32, u32),
    bar_color: [u8; 3],
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = image_size;
    let bins = histogram.counts().len() as u32;
    anyhow::ensure!(w >= bins && h > 0, "image too small for {bins} bins");
    let mut img = RgbImage::from_pixel(w, h, Rgb([20, 20, 24]));

    let freq = histogram.frequencies();
    let peak = freq
        .iter()
        .chain(expected.unwrap_or(&[]))
        .copied()
        .fold(0.0f64, f64::max);
    if peak <= 0.0 {
        img.save(path.as_ref())?;
        return Ok(());
    }

    let bar_w = w / bins;
    for (bin, f) in freq.iter().enumerate() {
        let bar_h = (f / peak * (h as f64 - 1.0)) as u32;
        let x0 = bin as u32 * bar_w;
        for x in x0 + 1..(x0 + bar_w).saturating_sub(1) {
            for y in h - bar_h..h {
                img.put_pixel(x, y, Rgb(bar_color));
            }
        }
        if let Some(e) = expected.and_then(|e| e.get(bin)) {
            let y = h - 1 - (e / peak * (h as f64 - 1.0)) as u32;
            for x in x0..x0 + bar_w {
                img.put_pixel(x, y, Rgb([235, 235, 235]));
            }
        }
    }

    img.save(path.as_ref())?;
    Ok(())
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    [mix(0), mix(1), mix(2)]
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn draw_line(img: &mut RgbImage, a: Vec2, b: Vec2, color: [u8; 3]) {
    let steps = (b - a).abs().max_element().ceil().max(1.0) as i64;
    for i in 0..=steps {
        let p = a.lerp(b, i as f32 / steps as f32);
        put(img, p.x.round() as i64, p.y.round() as i64, color);
    }
}

fn fill_circle(img: &mut RgbImage, center: Vec2, radius: f32, color: [u8; 3]) {
    let r = radius.ceil() as i64;
    let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if ((dx * dx + dy * dy) as f32) <= radius * radius {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}
