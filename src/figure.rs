//! The composed figure: an exclusively owned RGB canvas that cells are
//! blitted into, captions drawn onto, and finally encoded as one PNG.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::CompositorError;
use crate::grid::{contain_rect, CellFit, CellRect};

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

pub struct ComposedFigure {
    canvas: RgbImage,
}

impl ComposedFigure {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Blit one decoded image into a cell rectangle, aspect-preserved.
    pub fn place(&mut self, img: &DynamicImage, rect: CellRect, fit: CellFit) {
        let target = match fit {
            CellFit::Contain => contain_rect(img.width(), img.height(), rect),
            CellFit::Cover => rect,
        };
        let resized = match fit {
            CellFit::Contain => img.resize_exact(target.w, target.h, FilterType::Triangle),
            CellFit::Cover => img.resize_to_fill(target.w, target.h, FilterType::Triangle),
        };
        let rgba = resized.to_rgba8();
        for (px, py, p) in rgba.enumerate_pixels() {
            let x = target.x + px;
            let y = target.y + py;
            if x >= self.canvas.width() || y >= self.canvas.height() {
                continue;
            }
            let a = p[3] as u32;
            if a == 0 {
                continue;
            }
            let dst = self.canvas.get_pixel_mut(x, y);
            for c in 0..3 {
                let src = p[c] as u32;
                let bg = dst[c] as u32;
                dst[c] = ((src * a + bg * (255 - a) + 127) / 255) as u8;
            }
        }
    }

    /// Draw captions through the plotting backend, anchor-centered. The
    /// backend borrows the canvas buffer directly; nothing touches the disk.
    pub fn draw_captions(
        &mut self,
        captions: &[(String, (i32, i32))],
        font_px: u32,
    ) -> Result<(), CompositorError> {
        if captions.is_empty() {
            return Ok(());
        }
        let (w, h) = self.canvas.dimensions();
        let buf: &mut [u8] = &mut self.canvas;
        let root = BitMapBackend::with_buffer(buf, (w, h)).into_drawing_area();
        let style = ("sans-serif", font_px as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (text, anchor) in captions {
            root.draw(&Text::new(text.clone(), *anchor, style.clone()))
                .map_err(|e| CompositorError::CaptionRender(e.to_string()))?;
        }
        root.present()
            .map_err(|e| CompositorError::CaptionRender(e.to_string()))?;
        Ok(())
    }

    /// Crop to the bounding box of non-background pixels plus `pad`. A fully
    /// blank canvas is left untouched.
    pub fn trim_margins(&mut self, pad: u32) {
        let (w, h) = self.canvas.dimensions();
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (w, h, 0u32, 0u32);
        for (x, y, p) in self.canvas.enumerate_pixels() {
            if *p != BACKGROUND {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if min_x > max_x || min_y > max_y {
            return;
        }
        let x0 = min_x.saturating_sub(pad);
        let y0 = min_y.saturating_sub(pad);
        let x1 = (max_x + 1 + pad).min(w);
        let y1 = (max_y + 1 + pad).min(h);
        self.canvas =
            image::imageops::crop_imm(&self.canvas, x0, y0, x1 - x0, y1 - y0).to_image();
    }

    /// Encode the whole figure as PNG in memory, then write it in one go.
    /// Overwrites an existing file; on failure nothing is left behind.
    pub fn save(&self, path: &Path) -> Result<(), CompositorError> {
        let (w, h) = self.canvas.dimensions();
        let mut encoded = Vec::new();
        PngEncoder::new(Cursor::new(&mut encoded))
            .write_image(self.canvas.as_raw(), w, h, ExtendedColorType::Rgb8)
            .map_err(|e| CompositorError::OutputWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?;
        fs::write(path, &encoded).map_err(|source| CompositorError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
