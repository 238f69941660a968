//! Image sources. An [`ImageRef`] locates one decodable raster image, either
//! on disk or already in memory; it stays immutable once built.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::CompositorError;

#[derive(Clone, Debug)]
pub enum ImageRef {
    Path(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

impl ImageRef {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            name: name.into(),
            data,
        }
    }

    /// Display name used in logs and decode errors.
    pub fn name(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }

    /// File stem without extension, the original panel-title convention
    /// (`plots/NSAA1_Stand.png` -> `NSAA1_Stand`).
    pub fn stem(&self) -> String {
        let name = match self {
            Self::Path(p) => return stem_of(p),
            Self::Bytes { name, .. } => name.clone(),
        };
        stem_of(Path::new(&name))
    }

    pub fn decode(&self) -> Result<DynamicImage, CompositorError> {
        let result = match self {
            Self::Path(p) => image::open(p),
            Self::Bytes { data, .. } => image::load_from_memory(data),
        };
        result.map_err(|source| CompositorError::ImageDecode {
            name: self.name(),
            source,
        })
    }
}

impl From<&Path> for ImageRef {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
