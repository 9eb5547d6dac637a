//! QR style presets offered by the generator form

use serde::{Deserialize, Serialize};

/// Colour scheme chosen in the style `<select>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Slate blue
    Modern,
    /// Orange
    Vibrant,
    /// Dark grey
    Professional,
    /// Green
    Creative,
}

impl StylePreset {
    /// Resolves a `<select>` value; unknown values yield `None`
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "modern" => Some(Self::Modern),
            "vibrant" => Some(Self::Vibrant),
            "professional" => Some(Self::Professional),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    /// Primary colour as a CSS hex string
    #[must_use]
    pub const fn primary(self) -> &'static str {
        match self {
            Self::Modern => "#6A5ACD",
            Self::Vibrant => "#ED8936",
            Self::Professional => "#2D3748",
            Self::Creative => "#48BB78",
        }
    }

    /// Localized display name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Modern => "Модерен",
            Self::Vibrant => "Енергичен",
            Self::Professional => "Професионален",
            Self::Creative => "Креативен",
        }
    }
}
