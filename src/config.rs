//! Render configuration for the procedural app icon
//!
//! Every constant the renderer needs lives in [`IconConfig`]. The defaults
//! reproduce the reference FinanceFlow icon; a JSON file can override any
//! subset of fields.

use anyhow::{Context, Result};
use image::Rgb;
use serde::Deserialize;
use std::{fmt, path::Path, str::FromStr};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Linear interpolation toward `other`, truncating each channel
    pub fn lerp(self, other: Color, ratio: f64) -> Color {
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let from = self.0[i] as f64;
            let to = other.0[i] as f64;
            *channel = (from + (to - from) * ratio) as u8;
        }
        Color(out)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb(color.0)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let srgb = css_color::Srgb::from_str(s)
            .map_err(|_| anyhow::anyhow!("Invalid CSS color: {s}"))?;
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Ok(Color([
            channel(srgb.red),
            channel(srgb.green),
            channel(srgb.blue),
        ]))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

/// A point in reference-canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Curve geometry may reach this many reference canvases away from the origin
pub const MAX_GEOMETRY_EXTENT: f64 = 16.0;

/// Endpoint colors of the radial background gradient
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Background {
    /// Color the innermost layers approach
    pub inner: Color,
    /// Base fill and outermost layer color
    pub outer: Color,
}

impl Default for Background {
    fn default() -> Self {
        Background {
            inner: Color::rgb(139, 92, 246), // #8B5CF6
            outer: Color::rgb(99, 102, 241), // #6366F1
        }
    }
}

/// Everything the renderer needs to draw one icon.
///
/// Curve geometry and stroke width are expressed on a `reference_size` canvas
/// and scaled to `size` at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Output edge length in pixels
    pub size: u32,
    pub background: Background,
    pub curve_start: Point,
    pub curve_end: Point,
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
    /// Number of concentric circles in the background gradient
    pub layer_count: u32,
    pub base_stroke_width: f64,
    /// Outermost gradient radius as a fraction of `size`
    pub max_radius_fraction: f64,
    /// Number of parametric samples along the curve
    pub sample_count: usize,
    /// Canvas size the curve geometry is authored against
    pub reference_size: u32,
    pub stroke_color: Color,
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            size: 1024,
            background: Background::default(),
            curve_start: Point::new(200.0, 750.0),
            curve_end: Point::new(800.0, 250.0),
            wave_amplitude: 80.0,
            wave_frequency: 1.2,
            layer_count: 30,
            base_stroke_width: 16.0,
            max_radius_fraction: 0.72,
            sample_count: 150,
            reference_size: 1024,
            stroke_color: Color::rgb(255, 255, 255),
        }
    }
}

impl IconConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: IconConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Same config rendered at a different output size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Ratio between the output canvas and the reference canvas
    pub fn scale(&self) -> f64 {
        self.size as f64 / self.reference_size as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            anyhow::bail!("Icon size must be greater than zero");
        }
        if self.reference_size == 0 {
            anyhow::bail!("reference_size must be greater than zero");
        }
        if self.layer_count == 0 {
            anyhow::bail!("layer_count must be at least 1");
        }
        if self.sample_count < 2 {
            anyhow::bail!("sample_count must be at least 2");
        }

        let numbers = [
            ("curve_start.x", self.curve_start.x),
            ("curve_start.y", self.curve_start.y),
            ("curve_end.x", self.curve_end.x),
            ("curve_end.y", self.curve_end.y),
            ("wave_amplitude", self.wave_amplitude),
            ("wave_frequency", self.wave_frequency),
            ("base_stroke_width", self.base_stroke_width),
            ("max_radius_fraction", self.max_radius_fraction),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                anyhow::bail!("{name} must be a finite number, got {value}");
            }
        }
        if self.base_stroke_width < 0.0 {
            anyhow::bail!("base_stroke_width must not be negative");
        }
        if self.max_radius_fraction < 0.0 {
            anyhow::bail!("max_radius_fraction must not be negative");
        }

        let extent = self.reference_size as f64 * MAX_GEOMETRY_EXTENT;
        let geometry = [
            ("curve_start.x", self.curve_start.x),
            ("curve_start.y", self.curve_start.y),
            ("curve_end.x", self.curve_end.x),
            ("curve_end.y", self.curve_end.y),
            ("wave_amplitude", self.wave_amplitude),
            ("base_stroke_width", self.base_stroke_width),
        ];
        for (name, value) in geometry {
            if value.abs() > extent {
                anyhow::bail!(
                    "{name} is {value}, beyond {MAX_GEOMETRY_EXTENT}x reference_size ({extent})"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        IconConfig::default().validate().unwrap();
    }

    #[test]
    fn parses_css_colors() {
        assert_eq!("#6366F1".parse::<Color>().unwrap(), Color::rgb(99, 102, 241));
        assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::rgb(255, 255, 255));
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_is_hex() {
        assert_eq!(Color::rgb(139, 92, 246).to_string(), "#8B5CF6");
    }

    #[test]
    fn lerp_truncates_channels() {
        let bg = Background::default();
        let ratio = 29.0 / 30.0;
        assert_eq!(bg.outer.lerp(bg.inner, ratio), Color::rgb(137, 92, 245));
        assert_eq!(bg.outer.lerp(bg.inner, 0.0), bg.outer);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r##"{
            "size": 512,
            "background": { "inner": "#ff0000" },
            "wave_amplitude": 40
        }"##;
        let config: IconConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.size, 512);
        assert_eq!(config.background.inner, Color::rgb(255, 0, 0));
        assert_eq!(config.background.outer, Background::default().outer);
        assert_eq!(config.wave_amplitude, 40.0);
        assert_eq!(config.layer_count, 30);
        assert_eq!(config.curve_start, Point::new(200.0, 750.0));
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(IconConfig::default().with_size(0).validate().is_err());

        let mut config = IconConfig::default();
        config.sample_count = 1;
        assert!(config.validate().is_err());

        let mut config = IconConfig::default();
        config.wave_frequency = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_geometry_far_outside_the_canvas() {
        let mut config = IconConfig::default();
        config.wave_amplitude = 1e10;
        config.wave_frequency = 112.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("wave_amplitude"), "{err}");

        let mut config = IconConfig::default();
        config.curve_end = Point::new(-1e9, 250.0);
        assert!(config.validate().is_err());

        let mut config = IconConfig::default();
        config.wave_amplitude = 1024.0 * MAX_GEOMETRY_EXTENT;
        config.validate().unwrap();
    }

    #[test]
    fn scale_is_relative_to_reference() {
        assert_eq!(IconConfig::default().scale(), 1.0);
        assert_eq!(IconConfig::default().with_size(512).scale(), 0.5);
    }
}
