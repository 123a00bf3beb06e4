//! Prune near-transparent Gaussians from a 3DGS PLY asset.

use clap::Parser;
use indicatif::ProgressBar;
use splat_core::{mask, reader, transforms, writer};
use splat_tools::metrics::{self, AssetMetrics};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(about = "Optimize 3DGS PLY files by pruning transparent Gaussians.")]
struct Args {
    /// Path to the raw input PLY file.
    #[arg(long)]
    input: PathBuf,

    /// Path to save the optimized PLY file.
    #[arg(long)]
    output: PathBuf,

    /// Opacity threshold for pruning (0.0 to 1.0).
    #[arg(long, default_value_t = 0.05)]
    threshold: f32,
}

fn main() {
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!(
            "Error: Input file '{}' not found. Please check the path.",
            args.input.display()
        );
        return;
    }

    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    mask::validate_threshold(args.threshold)?;
    let started = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Loading {}...", args.input.display()));
    let table = reader::read_ply(&args.input)?;
    spinner.finish_with_message(format!("Loaded {} Gaussians", table.len()));

    let raw = AssetMetrics::measure(&args.input, table.len(), table.byte_footprint())?;

    let raw_opacity = table.column_f32("opacity")?;
    let real_opacity = transforms::activate_opacities(&raw_opacity);
    let keep = mask::opacity_mask(&real_opacity, args.threshold);
    let optimized = table.select(&keep)?;

    println!(
        "Pruning complete. Saving optimized asset to {}...",
        args.output.display()
    );
    writer::write_ply(&args.output, &optimized)?;

    let after = AssetMetrics::measure(&args.output, optimized.len(), optimized.byte_footprint())?;
    metrics::print_comparison(&raw, &after);

    println!(
        "Optimization complete in {:.2} seconds.",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
