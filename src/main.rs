// Entry point: CLI wiring around the library's compose_grid.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use gridfig::cli::Args;
use gridfig::config::AppConfig;
use gridfig::{compose_grid, CompositorError, GridSpec, ImageRef};

const RASTER_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = AppConfig::load_or_default(&args.config);

    let images = collect_images(&args)?;
    if images.is_empty() {
        return Err("no input images (pass paths or --from-dir)".into());
    }

    let spec = grid_for(args.rows, args.cols, images.len())?;

    let mut opts = cfg.compose_options();
    opts.figure_size = Some(cfg.figure_size(spec.rows(), spec.cols()));
    if let Some(dpi) = args.dpi {
        opts.dpi = dpi;
    }
    if let Some(tight) = args.tight {
        opts.tight_layout = tight;
    }
    if let Some(trim) = args.trim {
        opts.trim_margins = trim;
    }

    let auto_titles = args
        .auto_titles
        .unwrap_or(cfg.captions.enabled && cfg.captions.from_stem);
    opts.cell_titles = if !args.titles.is_empty() {
        Some(args.titles.clone())
    } else if auto_titles {
        Some(images.iter().map(ImageRef::stem).collect())
    } else {
        None
    };

    let out = PathBuf::from(&args.out);
    compose_grid(&images, spec, &out, &opts)?;
    println!("Saved figure to {}", out.display());
    Ok(())
}

fn collect_images(args: &Args) -> Result<Vec<ImageRef>, Box<dyn Error>> {
    let Some(dir) = &args.from_dir else {
        return Ok(args.images.iter().map(ImageRef::from_path).collect());
    };
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| {
                    RASTER_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
        })
        .collect();
    paths.sort();
    Ok(paths.into_iter().map(ImageRef::from).collect())
}

/// Resolve the grid: explicit flags win, a single flag determines the other
/// side, and with neither the grid is near-square.
fn grid_for(rows: Option<u32>, cols: Option<u32>, n: usize) -> Result<GridSpec, CompositorError> {
    let fit = |n: usize, side: u32| {
        if side == 0 {
            0
        } else {
            ((n + side as usize - 1) / side as usize) as u32
        }
    };
    let (rows, cols) = match (rows, cols) {
        (Some(r), Some(c)) => (r, c),
        (Some(r), None) => (r, fit(n, r)),
        (None, Some(c)) => (fit(n, c), c),
        (None, None) => {
            let c = (n as f64).sqrt().ceil().max(1.0) as u32;
            (fit(n, c), c)
        }
    };
    GridSpec::new(rows, cols)
}
