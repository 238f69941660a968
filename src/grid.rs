//! Grid geometry: spec validation, row-major cell addressing, and the pixel
//! layout of a composed figure (margins, inter-cell gaps, caption strips).

use crate::error::CompositorError;

/// Grid dimensions. Both sides are positive; construction enforces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32) -> Result<Self, CompositorError> {
        if rows == 0 || cols == 0 {
            return Err(CompositorError::InvalidGridSpec {
                rows,
                cols,
                reason: "rows and cols must be positive".into(),
            });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Row-major position of a cell index: all columns of row 0 precede row 1.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let row = (index / self.cols as usize) as u32;
        let col = (index % self.cols as usize) as u32;
        (row, col)
    }

    /// Rejects more images than cells; fewer is fine (trailing cells stay blank).
    pub fn check_capacity(&self, n_images: usize) -> Result<(), CompositorError> {
        if n_images > self.cells() {
            return Err(CompositorError::InvalidGridSpec {
                rows: self.rows,
                cols: self.cols,
                reason: format!("{} images exceed {} cells", n_images, self.cells()),
            });
        }
        Ok(())
    }
}

/// Pixel rectangle inside the composed canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Resolved pixel geometry of the whole figure.
///
/// `margin` is the outer border, `gap` the spacing between cells, and
/// `caption_h` a strip reserved above each cell's image area (zero when no
/// captions are drawn).
#[derive(Clone, Copy, Debug)]
pub struct GridLayout {
    width: u32,
    height: u32,
    margin: u32,
    gap: u32,
    caption_h: u32,
    cell_w: u32,
    cell_h: u32,
}

impl GridLayout {
    pub fn new(
        width: u32,
        height: u32,
        spec: GridSpec,
        margin: u32,
        gap: u32,
        caption_h: u32,
    ) -> Self {
        let cols = spec.cols();
        let rows = spec.rows();
        let inner_w = width.saturating_sub(2 * margin + (cols - 1) * gap);
        let inner_h = height.saturating_sub(2 * margin + (rows - 1) * gap);
        let cell_w = (inner_w / cols).max(1);
        let cell_h = (inner_h / rows).max(1);
        Self {
            width,
            height,
            margin,
            gap,
            caption_h: caption_h.min(cell_h.saturating_sub(1)),
            cell_w,
            cell_h,
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn cell_origin(&self, row: u32, col: u32) -> (u32, u32) {
        let x = self.margin + col * (self.cell_w + self.gap);
        let y = self.margin + row * (self.cell_h + self.gap);
        (x, y)
    }

    /// Area available to the bitmap itself (caption strip excluded).
    pub fn image_rect(&self, row: u32, col: u32) -> CellRect {
        let (x, y) = self.cell_origin(row, col);
        CellRect {
            x,
            y: y + self.caption_h,
            w: self.cell_w,
            h: self.cell_h - self.caption_h,
        }
    }

    /// Center of the caption strip, for anchor-centered text.
    pub fn caption_anchor(&self, row: u32, col: u32) -> (i32, i32) {
        let (x, y) = self.cell_origin(row, col);
        (
            (x + self.cell_w / 2) as i32,
            (y + self.caption_h / 2) as i32,
        )
    }
}

/// Per-cell aspect policy. Both preserve the source aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellFit {
    /// Scale to the largest size that fits the cell, pad with background.
    #[default]
    Contain,
    /// Scale to cover the cell, center-cropping the overflow.
    Cover,
}

/// Largest rectangle with the source's aspect ratio that fits `dst`, centered.
pub fn contain_rect(src_w: u32, src_h: u32, dst: CellRect) -> CellRect {
    let scale = f64::min(
        dst.w as f64 / src_w.max(1) as f64,
        dst.h as f64 / src_h.max(1) as f64,
    );
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, dst.w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, dst.h);
    CellRect {
        x: dst.x + (dst.w - w) / 2,
        y: dst.y + (dst.h - h) / 2,
        w,
        h,
    }
}
