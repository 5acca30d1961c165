//! Named colour palettes carried through to the serializer's fill/line styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Professional,
    Modern,
    Vibrant,
    Minimal,
}

/// Hex colours (no leading `#`, as the serializer expects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub scheme: ColorScheme,
    pub background: String,
    pub title: String,
    pub body: String,
    pub accent: String,
    pub cell_fill: String,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Professional,
        ColorScheme::Modern,
        ColorScheme::Vibrant,
        ColorScheme::Minimal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Professional => "professional",
            ColorScheme::Modern => "modern",
            ColorScheme::Vibrant => "vibrant",
            ColorScheme::Minimal => "minimal",
        }
    }

    pub fn palette(&self) -> Palette {
        let (background, title, body, accent, cell_fill) = match self {
            ColorScheme::Professional => ("FFFFFF", "1F3864", "333333", "2E75B6", "DEEAF6"),
            ColorScheme::Modern => ("1E1E2E", "F5F5F5", "D9D9D9", "00B4D8", "2B2B3D"),
            ColorScheme::Vibrant => ("FFF8F0", "C0392B", "2C3E50", "F39C12", "FDEBD0"),
            ColorScheme::Minimal => ("FAFAFA", "111111", "444444", "888888", "EEEEEE"),
        };
        Palette {
            scheme: *self,
            background: background.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            accent: accent.to_string(),
            cell_fill: cell_fill.to_string(),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme '{0}' (expected one of professional, modern, vibrant, minimal)")]
pub struct UnknownColorScheme(pub String);

impl FromStr for ColorScheme {
    type Err = UnknownColorScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ColorScheme::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownColorScheme(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scheme_has_six_digit_hex() {
        for scheme in ColorScheme::ALL {
            let p = scheme.palette();
            for hex in [&p.background, &p.title, &p.body, &p.accent, &p.cell_fill] {
                assert_eq!(hex.len(), 6, "{scheme}: {hex}");
                assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn test_scheme_parses_case_insensitive() {
        assert_eq!("Modern".parse::<ColorScheme>().unwrap(), ColorScheme::Modern);
        assert!("neon".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_unknown_scheme_error_message() {
        let err: Box<dyn std::error::Error> =
            Box::new(" neon ".parse::<ColorScheme>().unwrap_err());
        assert_eq!(
            err.to_string(),
            "unknown color scheme 'neon' (expected one of professional, modern, vibrant, minimal)"
        );
    }
}
