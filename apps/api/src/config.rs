use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::deck::models::DeckSettings;
use crate::deck::theme::ColorScheme;
use crate::layout::fit::{DEFAULT_MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::layout::grid::DEFAULT_MARGIN_FACTOR;
use crate::layout::splitter::WORD_BREAK_THRESHOLD;
use crate::layout::{standard_metrics, FontBounds, LayoutPreset};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub default_layout: LayoutPreset,
    pub default_color_scheme: ColorScheme,
    pub max_font_size: u8,
    pub min_font_size: u8,
    pub grid_margin_factor: f32,
    /// Safe-area inset from the slide edge, in inches.
    pub slide_margin: f32,
    pub word_break_threshold: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_layout: env_or("DECK_LAYOUT", LayoutPreset::default())?,
            default_color_scheme: env_or("DECK_COLOR_SCHEME", ColorScheme::default())?,
            max_font_size: env_or("DECK_MAX_FONT_SIZE", DEFAULT_MAX_FONT_SIZE)?,
            min_font_size: env_or("DECK_MIN_FONT_SIZE", MIN_FONT_SIZE)?,
            grid_margin_factor: env_or("DECK_GRID_MARGIN_FACTOR", DEFAULT_MARGIN_FACTOR)?,
            slide_margin: env_or("DECK_SLIDE_MARGIN", 0.5)?,
            word_break_threshold: env_or("DECK_WORD_BREAK_THRESHOLD", WORD_BREAK_THRESHOLD)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let smallest = standard_metrics().smallest();
        if self.min_font_size < smallest || self.min_font_size > self.max_font_size {
            bail!(
                "DECK_MIN_FONT_SIZE ({}) must be at least {}pt and not exceed DECK_MAX_FONT_SIZE ({})",
                self.min_font_size,
                smallest,
                self.max_font_size
            );
        }
        if !(self.grid_margin_factor > 0.0 && self.grid_margin_factor <= 1.0) {
            bail!("DECK_GRID_MARGIN_FACTOR must be in (0, 1]");
        }
        if !(self.slide_margin >= 0.0 && self.slide_margin.is_finite()) {
            bail!("DECK_SLIDE_MARGIN must be a non-negative number of inches");
        }
        if !(0.0..=1.0).contains(&self.word_break_threshold) {
            bail!("DECK_WORD_BREAK_THRESHOLD must be in [0, 1]");
        }
        Ok(())
    }

    /// Deck settings used when a request supplies no overrides.
    pub fn deck_settings(&self) -> DeckSettings {
        DeckSettings {
            layout: self.default_layout.layout(),
            palette: self.default_color_scheme.palette(),
            font_bounds: FontBounds {
                max: self.max_font_size,
                min: self.min_font_size,
            },
            margin_factor: self.grid_margin_factor,
            slide_margin: self.slide_margin,
            word_break_threshold: self.word_break_threshold,
            max_bullets_per_slide: None,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
