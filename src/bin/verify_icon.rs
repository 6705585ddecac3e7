use anyhow::{Context, Result};
use flow_icon::{icon_gen::background_layers, IconConfig};
use image::{io::Reader as ImageReader, ColorType, Rgb};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icon_output/AppIcon-1024x1024.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open image {path}"))?
        .decode()
        .context("Failed to decode image")?;

    let width = img.width();
    let height = img.height();

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{}", width, height);
    println!("Color type: {:?}", img.color());

    let mut problems = 0;
    if width != height {
        println!("⚠ Icon is not square");
        problems += 1;
    }
    if img.color() != ColorType::Rgb8 {
        println!("⚠ Expected RGB8 without alpha");
        problems += 1;
    }

    // Compare against the default palette rendered at this size
    let config = IconConfig::default().with_size(width);
    let rgb_img = img.to_rgb8();
    let base: Rgb<u8> = config.background.outer.into();

    if let Some(innermost) = background_layers(&config).last() {
        let expected: Rgb<u8> = innermost.color.into();
        let center = rgb_img.get_pixel(width / 2, height / 2);
        println!("\nCenter pixel: {:?} (expected {})", center.0, innermost.color);
        if *center != expected {
            println!("⚠ Center does not match the innermost gradient layer");
            problems += 1;
        }
    }

    let corners = [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)];
    let matching = corners
        .iter()
        .filter(|&&(x, y)| *rgb_img.get_pixel(x, y) == base)
        .count();
    println!(
        "Corners matching base color {}: {} of {}",
        config.background.outer,
        matching,
        corners.len()
    );
    if matching != corners.len() {
        problems += 1;
    }

    if problems > 0 {
        println!("⚠ {problems} check(s) failed; icon may use a custom config");
        anyhow::bail!("{path} does not match the default design");
    }

    println!("✓ Icon matches the default design");
    Ok(())
}
