//! Canvas size presets and export quality presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPreset {
    /// Display name.
    pub name: &'static str,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// Canvas presets offered by the design editor.
pub const CANVAS_PRESETS: &[CanvasPreset] = &[
    CanvasPreset {
        name: "Business Card",
        width: 350.0,
        height: 200.0,
    },
    CanvasPreset {
        name: "Poster (A4)",
        width: 595.0,
        height: 842.0,
    },
    CanvasPreset {
        name: "Social Media Post",
        width: 400.0,
        height: 400.0,
    },
    CanvasPreset {
        name: "Banner",
        width: 728.0,
        height: 90.0,
    },
    CanvasPreset {
        name: "Flyer",
        width: 400.0,
        height: 600.0,
    },
    CanvasPreset {
        name: "Logo",
        width: 300.0,
        height: 300.0,
    },
    CanvasPreset {
        name: "Custom",
        width: 800.0,
        height: 600.0,
    },
];

/// Look up a canvas preset by name, ignoring ASCII case.
#[must_use]
pub fn canvas_preset(name: &str) -> Option<&'static CanvasPreset> {
    CANVAS_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Output resolution for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Dots per inch.
    pub dpi: u32,
}

/// Export quality preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    /// 600×400 at 72 dpi.
    Low,
    /// 1200×800 at 150 dpi.
    Medium,
    /// 2400×1600 at 300 dpi.
    #[default]
    High,
    /// 4800×3200 at 600 dpi.
    Ultra,
}

impl QualityPreset {
    /// Resolution settings for this preset.
    #[must_use]
    pub const fn settings(self) -> QualitySettings {
        match self {
            Self::Low => QualitySettings {
                width: 600,
                height: 400,
                dpi: 72,
            },
            Self::Medium => QualitySettings {
                width: 1200,
                height: 800,
                dpi: 150,
            },
            Self::High => QualitySettings {
                width: 2400,
                height: 1600,
                dpi: 300,
            },
            Self::Ultra => QualitySettings {
                width: 4800,
                height: 3200,
                dpi: 600,
            },
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "ultra" => Ok(Self::Ultra),
            other => Err(format!("unknown quality preset: {other}")),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG raster.
    #[default]
    Png,
    /// JPEG raster.
    Jpeg,
    /// SVG vector.
    Svg,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}
