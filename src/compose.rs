//! The compose operation: validate, decode everything up front, render the
//! grid cell by cell, save once. Single-pass and stateless; every call owns
//! its own canvas and decoded buffers.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::CompositorError;
use crate::figure::ComposedFigure;
use crate::grid::{CellFit, GridLayout, GridSpec};
use crate::source::ImageRef;

/// Figure units per cell when no explicit size is given. Matches the
/// observed usage: a 2x2 grid at (10, 8) units.
const CELL_UNITS: (f32, f32) = (5.0, 4.0);

#[derive(Clone, Debug)]
pub struct ComposeOptions {
    /// Figure size in units; pixel dimensions are `size * dpi`. Defaults to
    /// `CELL_UNITS` scaled by the grid dimensions.
    pub figure_size: Option<(f32, f32)>,
    pub dpi: u32,
    /// Minimize margins and inter-cell gaps.
    pub tight_layout: bool,
    /// Per-cell captions, paired with images in order. Extra titles are
    /// ignored; missing ones leave cells uncaptioned.
    pub cell_titles: Option<Vec<String>>,
    pub fit: CellFit,
    /// Crop the finished figure to its content bounding box.
    pub trim_margins: bool,
    /// Caption font size in points (rendered at `pt * dpi / 72` pixels).
    pub caption_pt: f32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            figure_size: None,
            dpi: 100,
            tight_layout: true,
            cell_titles: None,
            fit: CellFit::default(),
            trim_margins: false,
            caption_pt: 12.0,
        }
    }
}

impl ComposeOptions {
    fn effective_dpi(&self) -> u32 {
        self.dpi.max(1)
    }

    /// Canvas size in pixels for a given grid.
    pub fn pixel_size(&self, spec: GridSpec) -> (u32, u32) {
        let dpi = self.effective_dpi() as f32;
        let (w_units, h_units) = self.figure_size.unwrap_or((
            CELL_UNITS.0 * spec.cols() as f32,
            CELL_UNITS.1 * spec.rows() as f32,
        ));
        (
            (w_units * dpi).round().max(1.0) as u32,
            (h_units * dpi).round().max(1.0) as u32,
        )
    }

    /// (outer margin, inter-cell gap) in pixels.
    fn paddings(&self) -> (u32, u32) {
        let dpi = self.effective_dpi();
        if self.tight_layout {
            (dpi / 50, dpi / 50)
        } else {
            (dpi / 5, dpi / 10)
        }
    }

    fn caption_px(&self) -> u32 {
        (self.caption_pt * self.effective_dpi() as f32 / 72.0).round().max(1.0) as u32
    }

    fn title_for(&self, index: usize) -> Option<&str> {
        self.cell_titles
            .as_ref()
            .and_then(|t| t.get(index))
            .map(String::as_str)
    }
}

/// Render the grid into an owned figure without touching the filesystem.
pub fn render_grid(
    images: &[ImageRef],
    spec: GridSpec,
    opts: &ComposeOptions,
) -> Result<ComposedFigure, CompositorError> {
    spec.check_capacity(images.len())?;

    // Decode everything before allocating the canvas: any bad input fails
    // the whole call with no partial output.
    let decoded: Vec<DynamicImage> = images
        .iter()
        .map(ImageRef::decode)
        .collect::<Result<_, _>>()?;

    let has_titles = (0..images.len()).any(|i| opts.title_for(i).is_some());
    let font_px = opts.caption_px();
    let strip = if has_titles { font_px * 8 / 5 } else { 0 };

    let (width, height) = opts.pixel_size(spec);
    let (margin, gap) = opts.paddings();
    let layout = GridLayout::new(width, height, spec, margin, gap, strip);

    let mut fig = ComposedFigure::blank(width, height);
    let mut captions = Vec::new();
    for (i, img) in decoded.iter().enumerate() {
        let (row, col) = spec.position(i);
        debug!(
            cell = i,
            row,
            col,
            source = %images[i].name(),
            "placing image"
        );
        fig.place(img, layout.image_rect(row, col), opts.fit);
        if let Some(title) = opts.title_for(i) {
            captions.push((title.to_string(), layout.caption_anchor(row, col)));
        }
    }
    fig.draw_captions(&captions, font_px)?;

    if opts.trim_margins {
        fig.trim_margins(opts.effective_dpi() / 20);
    }
    Ok(fig)
}

/// Compose the grid and write it to `output_path` as a single PNG,
/// overwriting any existing file there.
pub fn compose_grid(
    images: &[ImageRef],
    spec: GridSpec,
    output_path: &Path,
    opts: &ComposeOptions,
) -> Result<(), CompositorError> {
    let fig = render_grid(images, spec, opts)?;
    fig.save(output_path)?;
    info!(
        path = %output_path.display(),
        cells = spec.cells(),
        images = images.len(),
        "saved figure"
    );
    Ok(())
}
