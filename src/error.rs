use std::path::PathBuf;

use thiserror::Error;

/// Terminal errors of the grid compositor. No variant is retryable; a failed
/// call writes nothing to disk.
#[derive(Debug, Error)]
pub enum CompositorError {
    #[error("invalid grid {rows}x{cols}: {reason}")]
    InvalidGridSpec {
        rows: u32,
        cols: u32,
        reason: String,
    },

    #[error("failed to decode image {name}: {source}")]
    ImageDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only reachable when captions are requested; the text backend resolves
    /// fonts at draw time.
    #[error("caption rendering failed: {0}")]
    CaptionRender(String),
}
