//! gridfig: compose pre-rendered plot panels into one multi-panel figure.
//!
//! The single operation is [`compose_grid`]: an ordered list of images, a
//! rows×cols grid, an output path. Placement is row-major, aspect-preserved,
//! deterministic; cells past the image count stay blank. All failures are
//! terminal and leave nothing on disk.

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod figure;
pub mod grid;
pub mod source;

pub use compose::{compose_grid, render_grid, ComposeOptions};
pub use error::CompositorError;
pub use figure::ComposedFigure;
pub use grid::{CellFit, GridSpec};
pub use source::ImageRef;
