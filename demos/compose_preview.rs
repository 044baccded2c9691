//! Composes the hero backdrop still and writes it to the working directory.
//! Run with: cargo run --example compose_preview

use liquidfx::{BackdropConfig, Composer, Viewport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("LiquidFX - Compose Preview\n");

    let config = BackdropConfig {
        heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
        sub_label: Some("Interactive UI Component".to_string()),
        tagline: Some("Scroll to explore".to_string()),
        ..Default::default()
    };

    println!("Composing with config:");
    println!("  Heading: {}", config.heading_lines.join(" / "));
    println!("  Background: {}", config.background_color);
    println!("  Text: {}\n", config.text_color);

    let viewport = Viewport {
        width: 1280,
        height: 800,
        dpr: 2.0,
    };
    let image = Composer::new().compose(&config, viewport)?;

    std::fs::write("backdrop_preview.png", &image.png)?;
    println!(
        "Wrote backdrop_preview.png ({}x{} px, {} bytes)",
        image.width,
        image.height,
        image.png.len()
    );
    println!("Data URL length: {} chars", image.data_url().len());
    Ok(())
}
