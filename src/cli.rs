use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Image files in row-major placement order
    #[arg(value_name = "IMAGE")]
    pub images: Vec<String>,

    /// Collect raster files from a directory instead (non-recursive, sorted by name)
    #[arg(long, value_name = "DIR", conflicts_with = "images")]
    pub from_dir: Option<String>,

    /// Grid rows (inferred from the image count when omitted)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns (inferred from the image count when omitted)
    #[arg(long)]
    pub cols: Option<u32>,

    /// Output path
    #[arg(long, default_value = "combined_plots.png")]
    pub out: String,

    /// Path to config TOML
    #[arg(long, default_value = "gridfig.toml")]
    pub config: String,

    /// Per-cell caption, in image order (repeatable)
    #[arg(long = "title", value_name = "TEXT")]
    pub titles: Vec<String>,

    /// Derive captions from file stems (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub auto_titles: Option<bool>,

    /// Render resolution (overrides config)
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Minimize margins and cell spacing (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub tight: Option<bool>,

    /// Crop the figure to its content bounding box (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub trim: Option<bool>,
}
