//! Intake of raw model output: the slide JSON as the LLM returned it.
//!
//! Models wrap JSON in markdown fences often enough that this is handled here rather
//! than by every caller. Both `{"slides": [...]}` and a bare `[...]` are accepted.

use serde::Deserialize;
use thiserror::Error;

use crate::deck::models::{DeckSpec, SlideSpec};

#[derive(Debug, Error)]
pub enum DeckParseError {
    #[error("model output is empty")]
    Empty,

    #[error("model output is not valid slide JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model output contains no slides")]
    NoSlides,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeck {
    Deck(DeckSpec),
    Slides(Vec<SlideSpec>),
}

/// Parses model output into a [`DeckSpec`].
pub fn parse_deck(raw: &str) -> Result<DeckSpec, DeckParseError> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(DeckParseError::Empty);
    }

    let deck = match serde_json::from_str::<RawDeck>(text) {
        Ok(RawDeck::Deck(deck)) => deck,
        Ok(RawDeck::Slides(slides)) => DeckSpec {
            title: None,
            slides,
        },
        // Untagged errors are opaque; re-parse as the shape the text claims to be.
        Err(_) if text.starts_with('[') => DeckSpec {
            title: None,
            slides: serde_json::from_str::<Vec<SlideSpec>>(text)?,
        },
        Err(_) => serde_json::from_str::<DeckSpec>(text)?,
    };

    if deck.slides.is_empty() {
        return Err(DeckParseError::NoSlides);
    }
    Ok(deck)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
