use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use liquidfx::{BackdropConfig, Composer, EngineModule, Viewport};

#[derive(Parser)]
#[command(name = "liquidfx")]
#[command(version)]
#[command(about = "Compose liquid-backdrop stills and inspect the engine module", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rasterize the backdrop still image to a PNG file
    Compose(ComposeArgs),
    /// Print the pinned engine module and its delivery URL
    Module,
}

#[derive(Args)]
struct ComposeArgs {
    /// Read the configuration from a JSON file before applying flags
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Heading line; repeat the flag for a multi-line heading
    #[arg(long, value_name = "TEXT")]
    heading: Vec<String>,

    /// Small uppercase label above the heading
    #[arg(long, value_name = "TEXT")]
    sub_label: Option<String>,

    /// Tagline under the divider
    #[arg(long, value_name = "TEXT")]
    tagline: Option<String>,

    /// Background color, hex or rgb()/rgba()
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Text color, hex or rgb()/rgba()
    #[arg(long, value_name = "COLOR")]
    text: Option<String>,

    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Device pixel ratio of the raster
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,

    /// Output PNG path
    #[arg(short, long, default_value = "backdrop.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compose(args) => compose(args),
        Command::Module => module(),
    }
}

fn compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<BackdropConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => BackdropConfig::default(),
    };

    // Flags override whatever the file (or the default) provided
    if !args.heading.is_empty() {
        config.heading_lines = args.heading;
    }
    if args.sub_label.is_some() {
        config.sub_label = args.sub_label;
    }
    if args.tagline.is_some() {
        config.tagline = args.tagline;
    }
    if let Some(background) = args.background {
        config.background_color = background;
    }
    if let Some(text) = args.text {
        config.text_color = text;
    }

    let viewport = Viewport {
        width: args.width,
        height: args.height,
        dpr: args.dpr,
    };
    let image = Composer::new().compose(&config, viewport)?;
    fs::write(&args.out, &image.png)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!(
        "{} ({}x{} px, {} bytes, data URL {} chars)",
        args.out.display(),
        image.width,
        image.height,
        image.png.len(),
        image.data_url().len()
    );
    Ok(())
}

fn module() -> anyhow::Result<()> {
    let module = EngineModule::liquid_default();
    println!("{}", module);
    println!("{}", module.url()?);
    Ok(())
}
