use color_detect::{ColorName, HighlightConfig, OutputFormat};
use image::{Rgb, RgbImage};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Horizontal hue sweep over a vertical brightness ramp.
    let img = RgbImage::from_fn(360, 200, |x, y| {
        let hsv = [(x / 2) as u8, 255, (255 - y) as u8];
        let [r, g, b] = hsv_to_rgb(hsv);
        Rgb([r, g, b])
    });
    img.save(output_dir.join("hue_sweep.png"))?;

    for color in [ColorName::Red, ColorName::Green, ColorName::Blue] {
        let highlighted = HighlightConfig::new()
            .with_color(color)
            .with_output_format(OutputFormat::Png)
            .highlight_image(&img)?;
        let path = output_dir.join(format!("highlight_{color}.png"));
        highlighted.save(&path)?;
        println!("✓ {color}: {}", path.display());
    }

    Ok(())
}

fn hsv_to_rgb([h, s, v]: [u8; 3]) -> [u8; 3] {
    let h = h as f32 * 2.0;
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r, g, b].map(|ch| ((ch + m) * 255.0).round() as u8)
}
