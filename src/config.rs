use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::ComposeOptions;
use crate::grid::CellFit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Units per cell; the canvas is `cells * units * dpi` pixels.
    #[serde(default = "FigureConfig::default_cell_width")]
    pub cell_width: f32,
    #[serde(default = "FigureConfig::default_cell_height")]
    pub cell_height: f32,
    #[serde(default = "FigureConfig::default_dpi")]
    pub dpi: u32,
    #[serde(default = "FigureConfig::default_tight_layout")]
    pub tight_layout: bool,
    #[serde(default)]
    pub fit: FitSetting,
}

impl FigureConfig {
    fn default_cell_width() -> f32 {
        5.0
    }
    fn default_cell_height() -> f32 {
        4.0
    }
    fn default_dpi() -> u32 {
        100
    }
    fn default_tight_layout() -> bool {
        true
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            cell_width: Self::default_cell_width(),
            cell_height: Self::default_cell_height(),
            dpi: Self::default_dpi(),
            tight_layout: Self::default_tight_layout(),
            fit: FitSetting::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FitSetting {
    #[default]
    Contain,
    Cover,
}

impl From<FitSetting> for CellFit {
    fn from(s: FitSetting) -> Self {
        match s {
            FitSetting::Contain => CellFit::Contain,
            FitSetting::Cover => CellFit::Cover,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Derive captions from file stems when no explicit titles are given.
    #[serde(default = "CaptionConfig::default_from_stem")]
    pub from_stem: bool,
    #[serde(default = "CaptionConfig::default_font_pt")]
    pub font_pt: f32,
}

impl CaptionConfig {
    fn default_from_stem() -> bool {
        true
    }
    fn default_font_pt() -> f32 {
        12.0
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            from_stem: Self::default_from_stem(),
            font_pt: Self::default_font_pt(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub trim_margins: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub captions: CaptionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        commented.push('\n');
                    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                        commented.push_str(line);
                        commented.push('\n');
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                        commented.push('\n');
                    }
                }
                if let Err(err) = fs::write(path_obj, commented) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(_) => {
                eprintln!("Failed to serialize default config; continuing with defaults");
            }
        }
        default_cfg
    }

    /// Config portion of the compose options; titles come from the caller.
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            figure_size: None,
            dpi: self.figure.dpi,
            tight_layout: self.figure.tight_layout,
            cell_titles: None,
            fit: self.figure.fit.into(),
            trim_margins: self.output.trim_margins,
            caption_pt: self.captions.font_pt,
        }
    }

    /// Explicit figure size honoring configured per-cell units.
    pub fn figure_size(&self, rows: u32, cols: u32) -> (f32, f32) {
        (
            self.figure.cell_width * cols as f32,
            self.figure.cell_height * rows as f32,
        )
    }
}
