//! Extract SH DC color from a 3DGS PLY asset and export an interactive
//! scatter page.

use clap::Parser;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use splat_core::{mask, reader, transforms};
use splat_tools::viewer;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(about = "Extract SH DC components to visualize 3DGS as a standard RGB point cloud.")]
struct Args {
    /// Path to the input PLY file.
    #[arg(long)]
    input: PathBuf,

    /// Path to save the output HTML visualization.
    #[arg(long)]
    output: PathBuf,

    /// Maximum number of points to render (prevents browser crash).
    #[arg(long = "max_points", default_value_t = 50_000)]
    max_points: usize,

    /// Lower spatial percentile of the crop box.
    #[arg(long = "p_lower", default_value_t = 5.0)]
    p_lower: f64,

    /// Upper spatial percentile of the crop box.
    #[arg(long = "p_upper", default_value_t = 95.0)]
    p_upper: f64,

    /// Seed for the down-sampling RNG; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
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
    mask::validate_max_points(args.max_points)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Loading {}...", args.input.display()));
    let table = reader::read_ply(&args.input)?;
    spinner.finish_with_message(format!("Loaded {} Gaussians.", table.len()));

    // Down-sample before any spatial statistics: the crop percentiles are
    // computed over the subset that will actually be rendered.
    let sampled = if table.len() > args.max_points {
        println!(
            "Downsampling to {} points for browser rendering...",
            args.max_points
        );
        let indices = mask::sample_indices(table.len(), args.max_points, &mut rng)?;
        table.take(&indices)?
    } else {
        table
    };

    let (x, y, z) = sampled.positions()?;
    let aabb = mask::Aabb::from_percentiles(&x, &y, &z, args.p_lower, args.p_upper)?;
    let keep = mask::aabb_mask(&x, &y, &z, &aabb);
    let cropped = sampled.select(&keep)?;

    let (x, y, z) = cropped.positions()?;
    let r = transforms::sh_dc_to_rgb(&cropped.column_f32("f_dc_0")?);
    let g = transforms::sh_dc_to_rgb(&cropped.column_f32("f_dc_1")?);
    let b = transforms::sh_dc_to_rgb(&cropped.column_f32("f_dc_2")?);
    let colors = viewer::format_colors(&r, &g, &b);

    println!("Generating interactive 3D plot...");
    viewer::write_html(&args.output, &x, &y, &z, &colors)?;
    println!("Done! Saved visualization to {}", args.output.display());
    Ok(())
}
