use crate::canvas::{PixelPoint, Surface};
use crate::config::{Color, IconConfig};
use crate::contents_json::{ContentsFile, ImageEntry};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use log::{debug, info, warn};
use std::{
    f64::consts::PI,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct Args {
    pub config: IconConfig,
    pub output: PathBuf,
    /// Asset bundle to copy the icon into; `None` skips the copy step
    pub asset_dir: Option<PathBuf>,
    pub contents_json: bool,
}

/// One concentric circle of the background gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub radius: i32,
    pub color: Color,
}

/// A point on the curve and the stroke width drawn there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeSample {
    pub point: PixelPoint,
    pub width: i32,
}

/// Where the asset-bundle copy step ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Copied(PathBuf),
    MissingDir(PathBuf),
}

/// File name of the generated icon, e.g. `AppIcon-1024x1024.png`
pub fn output_file_name(size: u32) -> String {
    format!("AppIcon-{size}x{size}.png")
}

pub fn generate_icon(args: Args) -> Result<PathBuf> {
    let config = &args.config;
    config.validate()?;
    let size = config.size;

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    let icon = render_icon(config)?;

    let file_name = output_file_name(size);
    let output_path = args.output.join(&file_name);
    save_png(&icon, &output_path)?;
    println!("✓ Generated {} ({size}x{size})", output_path.display());

    if args.contents_json {
        write_contents_json(&args.output, &file_name, size)?;
    }

    if let Some(asset_dir) = &args.asset_dir {
        match copy_to_asset_dir(&output_path, asset_dir)? {
            Placement::Copied(dest) => {
                if size != 1024 {
                    warn!(
                        "Asset set expects 1024x1024, copied a {size}x{size} render as {ASSET_ICON_NAME}"
                    );
                }
                println!("✓ Copied icon to {}", dest.display());
            }
            Placement::MissingDir(dir) => {
                println!("⚠ AppIcon directory not found at {}", dir.display());
                println!(
                    "  Please manually copy {} to the AppIcon.appiconset folder",
                    output_path.display()
                );
            }
        }
    }

    println!("\n✓ Icon generation complete!");
    Ok(output_path)
}

/// Draw the full icon: gradient background first, then the curve on top
pub fn render_icon(config: &IconConfig) -> Result<RgbImage> {
    config.validate()?;

    let mut canvas = RgbImage::new(config.size, config.size);
    draw_background(&mut canvas, config);
    draw_curve(&mut canvas, config);

    Ok(canvas)
}

/// Gradient layers from outermost to innermost.
///
/// Radii shrink linearly from `max_radius_fraction * size`; colors move from
/// the outer toward the inner color. Generation stops at the first layer
/// whose radius truncates to zero.
pub fn background_layers(config: &IconConfig) -> Vec<Layer> {
    let max_radius = (config.size as f64 * config.max_radius_fraction) as i32;
    let count = config.layer_count;
    let bg = config.background;

    (0..count)
        .map(|i| {
            let ratio = i as f64 / count as f64;
            Layer {
                radius: (max_radius as f64 * (1.0 - ratio)) as i32,
                color: bg.outer.lerp(bg.inner, ratio),
            }
        })
        .take_while(|layer| layer.radius > 0)
        .collect()
}

pub fn draw_background<S: Surface>(surface: &mut S, config: &IconConfig) {
    let (width, height) = (surface.width(), surface.height());
    surface.fill_rect(PixelPoint::new(0, 0), width, height, config.background.outer);

    let center = (config.size / 2) as i32;
    let center = PixelPoint::new(center, center);
    let layers = background_layers(config);
    debug!(
        "Drawing {} background layers (outer radius {})",
        layers.len(),
        layers.first().map_or(0, |l| l.radius)
    );

    for layer in layers {
        surface.fill_circle(center, layer.radius, layer.color);
    }
}

/// Sample the decorative curve in output-pixel coordinates.
///
/// Each point is the straight line from `curve_start` to `curve_end` plus a
/// damped sine offset in x and cosine offset in y, scaled from the reference
/// canvas and truncated to integers.
pub fn curve_points(config: &IconConfig) -> Vec<PixelPoint> {
    let n = config.sample_count;
    let scale = config.scale();
    let (start, end) = (config.curve_start, config.curve_end);
    let amplitude = config.wave_amplitude;
    let frequency = config.wave_frequency;

    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;

            let base_x = start.x + (end.x - start.x) * t;
            let base_y = start.y + (end.y - start.y) * t;

            let offset_x = amplitude * (t * PI * frequency).sin() * (1.0 - t * 0.3);
            let offset_y =
                amplitude * 0.6 * (t * PI * frequency * 1.1).cos() * (1.0 - t * 0.2);

            PixelPoint::new(
                ((base_x + offset_x) * scale) as i32,
                ((base_y + offset_y) * scale) as i32,
            )
        })
        .collect()
}

/// Full stroke width in output pixels
pub fn line_width(config: &IconConfig) -> i32 {
    (config.base_stroke_width * config.scale()) as i32
}

/// Stroke width at a (possibly fractional) index along the curve.
///
/// The outer band at each end is 1/15 of the samples and draws at 60% width,
/// the next band draws at 80%.
pub fn tapered_width(position: f64, sample_count: usize, line_width: i32) -> i32 {
    let n = sample_count as f64;
    let thin = n / 15.0;
    let medium = thin * 2.0;

    if position < thin || position > n - thin {
        (line_width as f64 * 0.6) as i32
    } else if position < medium || position > n - medium {
        (line_width as f64 * 0.8) as i32
    } else {
        line_width
    }
}

pub fn curve_samples(config: &IconConfig) -> Vec<StrokeSample> {
    let width = line_width(config);
    let n = config.sample_count;

    curve_points(config)
        .into_iter()
        .enumerate()
        .map(|(i, point)| StrokeSample {
            point,
            width: tapered_width(i as f64, n, width),
        })
        .collect()
}

/// Parameter range `[t0, t1]` of `origin + delta * t`, `t` in `[0, 1]`, that
/// lies inside the rectangle `lo..=hi` (Liang-Barsky).
fn clip_segment(
    origin: (f64, f64),
    delta: (f64, f64),
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<(f64, f64)> {
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [
        (-delta.0, origin.0 - lo.0),
        (delta.0, hi.0 - origin.0),
        (-delta.1, origin.1 - lo.1),
        (delta.1, hi.1 - origin.1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

/// Stamp circles at every sample, then fill the gaps between consecutive
/// samples with interpolated stamps so the stroke reads as one line.
///
/// Sub-steps keep the full segment's step grid, but only the ones whose stamp
/// can reach the canvas are visited. Returns the number of interpolated
/// stamps drawn.
pub fn draw_curve<S: Surface>(surface: &mut S, config: &IconConfig) -> usize {
    let samples = curve_samples(config);
    let width = line_width(config);
    let n = samples.len();
    let color = config.stroke_color;

    for sample in &samples {
        surface.fill_circle(sample.point, sample.width / 2, color);
    }

    // A stamp centered further out than its radius plus truncation slack
    // cannot touch a pixel.
    let margin = width.max(0) as f64 + 2.0;
    let lo = (-margin, -margin);
    let hi = (
        surface.width() as f64 + margin,
        surface.height() as f64 + margin,
    );

    let mut stamps = 0usize;
    for (i, pair) in samples.windows(2).enumerate() {
        let (p1, p2) = (pair[0].point, pair[1].point);
        let origin = (p1.x as f64, p1.y as f64);
        let dx = p2.x as f64 - origin.0;
        let dy = p2.y as f64 - origin.1;
        let steps = ((dx * dx + dy * dy).sqrt() / 4.0).floor().max(8.0);

        let Some((t0, t1)) = clip_segment(origin, (dx, dy), lo, hi) else {
            continue;
        };
        let first = (t0 * steps).ceil().max(1.0) as u64;
        let last = (t1 * steps).floor().min(steps - 1.0) as u64;

        for j in first..=last {
            let t = j as f64 / steps;
            let point = PixelPoint::new((origin.0 + dx * t) as i32, (origin.1 + dy * t) as i32);
            let current = tapered_width(i as f64 + t, n, width);
            surface.fill_circle(point, current / 2, color);
            stamps += 1;
        }
    }

    debug!("Drew curve: {n} samples, {stamps} interpolated stamps, width {width}");
    stamps
}

/// Write the canvas as an RGB PNG
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(image, &mut out_file)?;
    out_file.flush().context("Failed to write PNG")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .context("Failed to write PNG")?;
    Ok(())
}

/// Name the app project's icon set references, whatever size was rendered
pub const ASSET_ICON_NAME: &str = "AppIcon-1024x1024.png";

/// Copy `icon` into `asset_dir` as [`ASSET_ICON_NAME`].
///
/// A missing asset directory is reported back rather than created, since it
/// marks a checkout without the app project next to it.
pub fn copy_to_asset_dir(icon: &Path, asset_dir: &Path) -> Result<Placement> {
    if !asset_dir.is_dir() {
        info!("Asset directory {} does not exist, skipping copy", asset_dir.display());
        return Ok(Placement::MissingDir(asset_dir.to_path_buf()));
    }

    let dest = asset_dir.join(ASSET_ICON_NAME);
    std::fs::copy(icon, &dest).with_context(|| {
        format!("Failed to copy {} to {}", icon.display(), dest.display())
    })?;

    Ok(Placement::Copied(dest))
}

/// Write Contents.json describing the icon as a single-size iOS app icon
fn write_contents_json(out_dir: &Path, file_name: &str, size: u32) -> Result<()> {
    let mut contents = ContentsFile::new("flow-icon".to_string());
    contents.add_image(ImageEntry::universal_app_icon(file_name.to_string(), size));

    let contents_path = out_dir.join("Contents.json");
    let contents_json =
        serde_json::to_string_pretty(&contents).context("Failed to serialize Contents.json")?;

    std::fs::write(&contents_path, contents_json).context("Failed to write Contents.json file")?;

    println!("  ✓ Generated {}", contents_path.display());
    Ok(())
}
