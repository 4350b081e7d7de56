use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use env_logger::Env;
use log::info;

use palette_recolor_rs::config::{PalettePreset, RecolorConfig, DEFAULT_CANVAS, DEFAULT_OUTPUT};
use palette_recolor_rs::PruningRule;

#[derive(Parser)]
#[command(name = "palette-recolor", about = "Recolor an image with the colors of a palette image")]
struct Cli {
    /// Image whose colors form the palette. Takes precedence over --preset.
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Bundled palette under Palettes/ (16, 27, 64, 128 or 256 colors).
    #[arg(long)]
    preset: Option<PalettePreset>,

    /// Image to recolor.
    #[arg(short, long, default_value = DEFAULT_CANVAS)]
    canvas: PathBuf,

    /// Where to write the recolored image.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Far-side pruning test: "absolute" finds the exact nearest color,
    /// "squared" reproduces the squared-delta comparison.
    #[arg(long, default_value = "absolute")]
    pruning: PruningRule,

    /// Look up pixels on a single thread.
    #[arg(long)]
    sequential: bool,
}

impl From<Cli> for RecolorConfig {
    fn from(cli: Cli) -> Self {
        RecolorConfig {
            palette: RecolorConfig::resolve_palette(cli.palette, cli.preset),
            canvas: cli.canvas,
            output: cli.output,
            rule: cli.pruning,
            parallel: !cli.sequential
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let start = Instant::now();
    let config: RecolorConfig = Cli::parse().into();

    info!("Palette image: {}", config.palette.display());
    info!("Canvas image: {}", config.canvas.display());

    let report = palette_recolor_rs::run(&config).unwrap_or_else(|e| {
        eprintln!("Failed to recolor {}: {e}", config.canvas.display());
        process::exit(1);
    });

    println!("{report}");
    println!("Output written to {}", config.output.display());
    info!("Full program duration: {} ms", start.elapsed().as_millis());
}
