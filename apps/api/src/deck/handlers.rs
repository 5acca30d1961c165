//! Axum route handlers for the layout and deck APIs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deck::assembler::assemble_deck;
use crate::deck::models::{DeckLayout, DeckOptions, DeckSettings, DeckSpec};
use crate::deck::parse::parse_deck;
use crate::deck::theme::ColorScheme;
use crate::errors::AppError;
use crate::layout::fit::MIN_FONT_SIZE;
use crate::layout::{
    calculate_optimal_font_size, calculate_optimal_font_size_within, fit_paragraph,
    split_into_boxes_with_threshold, standard_metrics, truncate_to_container, FitResult,
    FittedText, FontBounds, LayoutPreset, Rect,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FitTextRequest {
    pub text: String,
    pub width: f32,
    pub height: f32,
    pub max_font_size: Option<u8>,
    /// Defaults to the engine floor (8pt), not the service's deck setting.
    pub min_font_size: Option<u8>,
    pub word_break_threshold: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct FitTextResponse {
    /// Search over the explicit `\n`-separated lines only.
    pub line_fit: FitResult,
    /// Search with word wrapping; `lines` is the wrapped text.
    pub wrapped: FittedText,
    /// The text cut to the container at the wrapped font size.
    pub truncated: String,
    /// The text split into container-sized boxes at the wrapped font size.
    pub boxes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeckRequest {
    pub deck: DeckSpec,
    #[serde(default)]
    pub options: DeckOptions,
}

#[derive(Debug, Deserialize)]
pub struct RawDeckRequest {
    /// Model output as returned by the chat completion, fences and all.
    pub content: String,
    #[serde(default)]
    pub options: DeckOptions,
}

#[derive(Debug, Serialize)]
pub struct LayoutInfo {
    pub name: LayoutPreset,
    pub width: f32,
    pub height: f32,
    pub safe_area: Rect,
}

#[derive(Debug, Serialize)]
pub struct LayoutsResponse {
    pub layouts: Vec<LayoutInfo>,
    pub color_schemes: Vec<ColorScheme>,
    pub default_layout: LayoutPreset,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/layouts
///
/// Lists the canvas presets with their safe areas at the configured margin.
pub async fn handle_list_layouts(State(state): State<AppState>) -> Json<LayoutsResponse> {
    let margin = state.deck_defaults.slide_margin;
    let layouts = LayoutPreset::ALL
        .into_iter()
        .map(|preset| {
            let layout = preset.layout();
            LayoutInfo {
                name: preset,
                width: layout.width,
                height: layout.height,
                safe_area: layout.safe_area(margin),
            }
        })
        .collect();

    Json(LayoutsResponse {
        layouts,
        color_schemes: ColorScheme::ALL.to_vec(),
        default_layout: state.config.default_layout,
    })
}

/// POST /api/v1/layout/fit
///
/// Runs the fit engine on a single block of text and reports every stage.
pub async fn handle_fit_text(
    State(state): State<AppState>,
    Json(request): Json<FitTextRequest>,
) -> Result<Json<FitTextResponse>, AppError> {
    validate_dimensions(request.width, request.height)?;

    let max = request
        .max_font_size
        .unwrap_or(state.deck_defaults.font_bounds.max);
    let min = request.min_font_size.unwrap_or(MIN_FONT_SIZE);
    let bounds = validate_bounds(max, min)?;
    let metrics = standard_metrics();
    let text = request.text.as_str();

    let line_fit = match request.min_font_size {
        None => calculate_optimal_font_size(text, request.width, request.height, max, metrics),
        Some(_) => {
            calculate_optimal_font_size_within(text, request.width, request.height, bounds, metrics)
        }
    };
    let wrapped = fit_paragraph(text, request.width, request.height, bounds, metrics);
    let truncated = truncate_to_container(
        text,
        request.width,
        request.height,
        wrapped.font_size,
        metrics,
    );
    let threshold = match request.word_break_threshold {
        Some(threshold) => validate_threshold(threshold)?,
        None => state.deck_defaults.word_break_threshold,
    };
    let boxes = split_into_boxes_with_threshold(
        text,
        request.width,
        request.height,
        wrapped.font_size,
        metrics,
        threshold,
    );

    Ok(Json(FitTextResponse {
        line_fit,
        wrapped,
        truncated,
        boxes,
    }))
}

/// POST /api/v1/deck/layout
///
/// Lays out structured slide descriptions.
pub async fn handle_layout_deck(
    State(state): State<AppState>,
    Json(request): Json<DeckRequest>,
) -> Result<Json<DeckLayout>, AppError> {
    if request.deck.slides.is_empty() {
        return Err(AppError::Validation("deck.slides cannot be empty".to_string()));
    }
    let settings = resolve_settings(&state.deck_defaults, &request.options)?;
    let layout = run_assembly(request.deck, settings).await?;
    Ok(Json(layout))
}

/// POST /api/v1/deck/layout/raw
///
/// Parses raw model output into slides, then lays them out.
pub async fn handle_layout_raw(
    State(state): State<AppState>,
    Json(request): Json<RawDeckRequest>,
) -> Result<Json<DeckLayout>, AppError> {
    let deck = parse_deck(&request.content)?;
    let settings = resolve_settings(&state.deck_defaults, &request.options)?;
    let layout = run_assembly(deck, settings).await?;
    Ok(Json(layout))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Assembly is CPU-bound; keep it off the async executor.
async fn run_assembly(deck: DeckSpec, settings: DeckSettings) -> Result<DeckLayout, AppError> {
    let slide_count = deck.slides.len();
    let layout = tokio::task::spawn_blocking(move || {
        assemble_deck(&deck, &settings, standard_metrics())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in deck assembly: {e}")))?;

    info!(
        slides_in = slide_count,
        slides_out = layout.slides.len(),
        overflow = layout.overflow_count,
        layout = %layout.layout.preset,
        "Deck laid out"
    );
    Ok(layout)
}

/// Applies per-request overrides on top of the configured defaults.
pub(crate) fn resolve_settings(
    defaults: &DeckSettings,
    options: &DeckOptions,
) -> Result<DeckSettings, AppError> {
    let mut settings = defaults.clone();

    if let Some(name) = &options.layout_name {
        let preset: LayoutPreset = name
            .parse()
            .map_err(|e| AppError::Validation(format!("{e}")))?;
        settings.layout = preset.layout();
    }
    if let Some(name) = &options.color_scheme {
        let scheme: ColorScheme = name
            .parse()
            .map_err(|e| AppError::Validation(format!("{e}")))?;
        settings.palette = scheme.palette();
    }

    let max = options.max_font_size.unwrap_or(settings.font_bounds.max);
    let min = options.min_font_size.unwrap_or(settings.font_bounds.min);
    settings.font_bounds = validate_bounds(max, min)?;

    if let Some(factor) = options.margin_factor {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(AppError::Validation(
                "margin_factor must be in (0, 1]".to_string(),
            ));
        }
        settings.margin_factor = factor;
    }
    if let Some(limit) = options.max_bullets_per_slide {
        if limit == 0 {
            return Err(AppError::Validation(
                "max_bullets_per_slide must be at least 1".to_string(),
            ));
        }
        settings.max_bullets_per_slide = Some(limit);
    }

    Ok(settings)
}

fn validate_dimensions(width: f32, height: f32) -> Result<(), AppError> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(AppError::Validation(
            "width and height must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Font sizes below the metric table would be measured with the smallest entry, so the
/// floor must be a size the table can actually measure.
fn validate_bounds(max: u8, min: u8) -> Result<FontBounds, AppError> {
    let smallest = standard_metrics().smallest();
    if min < smallest {
        return Err(AppError::Validation(format!(
            "min_font_size ({min}) is below the smallest supported size ({smallest}pt)"
        )));
    }
    if min > max {
        return Err(AppError::Validation(format!(
            "min_font_size ({min}) exceeds max_font_size ({max})"
        )));
    }
    Ok(FontBounds { max, min })
}

fn validate_threshold(threshold: f32) -> Result<f32, AppError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AppError::Validation(
            "word_break_threshold must be in [0, 1]".to_string(),
        ));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DeckSettings {
        DeckSettings {
            layout: LayoutPreset::Widescreen16x9.layout(),
            palette: ColorScheme::Professional.palette(),
            font_bounds: FontBounds::default(),
            margin_factor: 0.9,
            slide_margin: 0.5,
            word_break_threshold: 0.7,
            max_bullets_per_slide: None,
        }
    }

    #[test]
    fn test_resolve_settings_defaults_untouched() {
        let settings = resolve_settings(&defaults(), &DeckOptions::default()).unwrap();
        assert_eq!(settings.layout.preset, LayoutPreset::Widescreen16x9);
        assert_eq!(settings.font_bounds, FontBounds::default());
    }

    #[test]
    fn test_resolve_settings_applies_overrides() {
        let options = DeckOptions {
            layout_name: Some("LAYOUT_4x3".to_string()),
            color_scheme: Some("vibrant".to_string()),
            max_font_size: Some(20),
            min_font_size: Some(10),
            margin_factor: Some(0.8),
            max_bullets_per_slide: Some(4),
        };
        let settings = resolve_settings(&defaults(), &options).unwrap();
        assert_eq!(settings.layout.height, 7.5);
        assert_eq!(settings.palette.scheme, ColorScheme::Vibrant);
        assert_eq!(settings.font_bounds, FontBounds { max: 20, min: 10 });
        assert_eq!(settings.margin_factor, 0.8);
        assert_eq!(settings.max_bullets_per_slide, Some(4));
    }

    #[test]
    fn test_resolve_settings_rejects_bad_input() {
        let cases = [
            DeckOptions {
                layout_name: Some("LAYOUT_A4".to_string()),
                ..Default::default()
            },
            DeckOptions {
                color_scheme: Some("neon".to_string()),
                ..Default::default()
            },
            DeckOptions {
                max_font_size: Some(10),
                min_font_size: Some(12),
                ..Default::default()
            },
            DeckOptions {
                margin_factor: Some(0.0),
                ..Default::default()
            },
            DeckOptions {
                max_bullets_per_slide: Some(0),
                ..Default::default()
            },
        ];
        for options in cases {
            assert!(
                matches!(
                    resolve_settings(&defaults(), &options),
                    Err(AppError::Validation(_))
                ),
                "expected validation error for {options:?}"
            );
        }
    }

    #[test]
    fn test_validate_bounds_rejects_floor_below_table() {
        assert!(matches!(validate_bounds(24, 5), Err(AppError::Validation(_))));
        assert!(matches!(validate_bounds(24, 0), Err(AppError::Validation(_))));
        assert_eq!(validate_bounds(24, 8).unwrap(), FontBounds { max: 24, min: 8 });

        let options = DeckOptions {
            min_font_size: Some(6),
            ..Default::default()
        };
        assert!(matches!(
            resolve_settings(&defaults(), &options),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_threshold_range() {
        assert_eq!(validate_threshold(0.5).unwrap(), 0.5);
        assert!(validate_threshold(1.5).is_err());
        assert!(validate_threshold(f32::NAN).is_err());
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(8.0, 3.0).is_ok());
        assert!(validate_dimensions(0.0, 3.0).is_err());
        assert!(validate_dimensions(8.0, -1.0).is_err());
        assert!(validate_dimensions(f32::NAN, 1.0).is_err());
    }
}
