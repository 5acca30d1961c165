//! Deck assembly: turns slide descriptions into positioned, non-overflowing text boxes.
//!
//! # Flow per slide
//! 1. Split the safe area into a title band and a body region.
//! 2. Fit text with the wrapped font-size search.
//! 3. When body content cannot fit even at the floor size, split it across
//!    continuation slides (bullets and prose both by wrapped line count at the floor).
//! 4. Anything that still does not fit (titles, grid cells, single giant bullets)
//!    is truncated to its container and flagged `fits: false`.
//! 5. Every element is clamped into the safe area and then onto the canvas. This runs
//!    last because steps 2–4 can all recommend containers that need clamping.

use tracing::{debug, warn};

use crate::deck::models::{
    DeckLayout, DeckSettings, DeckSpec, ElementRole, GridItemSpec, PositionedSlide, SlideSpec,
    TextBoxDescriptor,
};
use crate::layout::{
    clamp_within, fit_paragraph, layout_items_in_grid, pack_items_into_boxes,
    split_items_into_boxes, split_wrapped_into_boxes, truncate_to_container, validate_position,
    FontBounds, FontMetricTable, Rect,
};

/// Fraction of the safe area's height reserved for the slide title.
const TITLE_BAND_FRACTION: f32 = 0.18;
/// Vertical gap between the title band and the body, in inches.
const TITLE_GAP: f32 = 0.15;
/// Horizontal room taken by bullet glyphs and indentation.
const BULLET_INDENT: f32 = 0.3;
/// Grid slides hold at most this many cells; the rest go to continuation slides.
const MAX_GRID_ITEMS: usize = 9;
const CELL_PADDING: f32 = 0.08;
const CELL_HEADING_FRACTION: f32 = 0.3;

/// Assembles a whole deck. Pure apart from logging.
pub fn assemble_deck(
    spec: &DeckSpec,
    settings: &DeckSettings,
    metrics: &FontMetricTable,
) -> DeckLayout {
    let assembler = Assembler::new(settings, metrics);
    let mut slides: Vec<PositionedSlide> = Vec::new();

    for (source_index, slide) in spec.slides.iter().enumerate() {
        let pages = match slide {
            SlideSpec::Title { title, subtitle } => {
                vec![assembler.title_slide(title, subtitle.as_deref())]
            }
            SlideSpec::Bullets { title, bullets } => assembler.bullets_slide(title, bullets),
            SlideSpec::Text { title, body } => assembler.text_slide(title, body),
            SlideSpec::Grid { title, items } => assembler.grid_slide(title, items),
        };

        if pages.len() > 1 {
            debug!(
                source_index,
                pages = pages.len(),
                "Slide content split across continuation slides"
            );
        }

        for (page, elements) in pages.into_iter().enumerate() {
            let elements = elements
                .into_iter()
                .map(|e| assembler.finalize(e))
                .collect();
            slides.push(PositionedSlide {
                index: slides.len(),
                source_index,
                continuation: page > 0,
                background: settings.palette.background.clone(),
                elements,
            });
        }
    }

    let overflow_count = slides
        .iter()
        .flat_map(|s| s.elements.iter())
        .filter(|e| !e.fits)
        .count();
    if overflow_count > 0 {
        warn!(
            overflow_count,
            "Deck assembled with truncated elements that did not fit at the floor size"
        );
    }

    DeckLayout {
        title: spec.title.clone(),
        layout: settings.layout,
        safe_area: assembler.safe_area,
        palette: settings.palette.clone(),
        slides,
        overflow_count,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembler
// ────────────────────────────────────────────────────────────────────────────

struct Assembler<'a> {
    settings: &'a DeckSettings,
    metrics: &'a FontMetricTable,
    safe_area: Rect,
}

impl<'a> Assembler<'a> {
    fn new(settings: &'a DeckSettings, metrics: &'a FontMetricTable) -> Self {
        Self {
            settings,
            metrics,
            safe_area: settings.layout.safe_area(settings.slide_margin),
        }
    }

    /// Titles search from the top of the metric table.
    fn title_bounds(&self) -> FontBounds {
        FontBounds {
            max: self.metrics.largest().max(self.settings.font_bounds.max),
            min: self.settings.font_bounds.min,
        }
    }

    /// `(title band, body region)` for a content slide.
    fn regions(&self) -> (Rect, Rect) {
        let (band, rest) = self
            .safe_area
            .split_top(self.safe_area.height * TITLE_BAND_FRACTION);
        let gap = TITLE_GAP.min(rest.height);
        let body = Rect::new(rest.x, rest.y + gap, rest.width, rest.height - gap);
        (band, body)
    }

    // ── slide kinds ─────────────────────────────────────────────────────────

    fn title_slide(&self, title: &str, subtitle: Option<&str>) -> Vec<TextBoxDescriptor> {
        let sa = self.safe_area;
        let title_rect = Rect::new(sa.x, sa.y + sa.height * 0.3, sa.width, sa.height * 0.25);
        let subtitle_rect = Rect::new(sa.x, title_rect.bottom(), sa.width, sa.height * 0.15);
        let palette = &self.settings.palette;

        let mut elements = Vec::new();
        if !title.trim().is_empty() {
            elements.push(self.place_text(
                ElementRole::Title,
                title.trim(),
                title_rect,
                self.title_bounds(),
                &palette.title,
            ));
        }
        if let Some(subtitle) = subtitle.map(str::trim).filter(|s| !s.is_empty()) {
            elements.push(self.place_text(
                ElementRole::Subtitle,
                subtitle,
                subtitle_rect,
                self.settings.font_bounds,
                &palette.accent,
            ));
        }
        elements
    }

    fn bullets_slide(&self, title: &str, bullets: &[String]) -> Vec<Vec<TextBoxDescriptor>> {
        let (band, body) = self.regions();
        let items: Vec<String> = bullets
            .iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if items.is_empty() {
            return vec![self.title_only(title, band, false)];
        }

        let groups = match self.settings.max_bullets_per_slide {
            Some(limit) => split_items_into_boxes(&items, limit),
            None => vec![items],
        };

        let fit_width = (body.width - BULLET_INDENT).max(0.0);
        let bounds = self.settings.font_bounds;
        let mut pages: Vec<Vec<String>> = Vec::new();
        for group in groups {
            let fitted = fit_paragraph(&group.join("\n"), fit_width, body.height, bounds, self.metrics);
            if fitted.fits {
                pages.push(group);
            } else {
                pages.extend(pack_items_into_boxes(
                    &group,
                    fit_width,
                    body.height,
                    bounds.min,
                    self.metrics,
                ));
            }
        }

        pages
            .into_iter()
            .enumerate()
            .map(|(page, group)| {
                let mut elements = self.title_only(title, band, page > 0);
                let mut bullets = self.place_text(
                    ElementRole::Bullets,
                    &group.join("\n"),
                    Rect::new(body.x, body.y, fit_width, body.height),
                    bounds,
                    &self.settings.palette.body,
                );
                bullets.rect = body;
                bullets.bullet = true;
                elements.push(bullets);
                elements
            })
            .collect()
    }

    fn text_slide(&self, title: &str, body_text: &str) -> Vec<Vec<TextBoxDescriptor>> {
        let (band, body) = self.regions();
        let body_text = body_text.trim();
        if body_text.is_empty() {
            return vec![self.title_only(title, band, false)];
        }

        let bounds = self.settings.font_bounds;
        let fitted = fit_paragraph(body_text, body.width, body.height, bounds, self.metrics);
        let chunks = if fitted.fits {
            vec![body_text.to_string()]
        } else {
            split_wrapped_into_boxes(body_text, body.width, body.height, bounds.min, self.metrics)
        };

        chunks
            .into_iter()
            .enumerate()
            .map(|(page, chunk)| {
                let mut elements = self.title_only(title, band, page > 0);
                elements.push(self.place_text(
                    ElementRole::Body,
                    &chunk,
                    body,
                    bounds,
                    &self.settings.palette.body,
                ));
                elements
            })
            .collect()
    }

    fn grid_slide(&self, title: &str, items: &[GridItemSpec]) -> Vec<Vec<TextBoxDescriptor>> {
        let (band, body) = self.regions();
        if items.is_empty() {
            return vec![self.title_only(title, band, false)];
        }

        let palette = &self.settings.palette;
        let bounds = self.settings.font_bounds;

        split_items_into_boxes(items, MAX_GRID_ITEMS)
            .into_iter()
            .enumerate()
            .map(|(page, group)| {
                let mut elements = self.title_only(title, band, page > 0);
                let cells = layout_items_in_grid(&body, group.len(), self.settings.margin_factor);
                for (item, cell) in group.iter().zip(cells) {
                    let inner = cell.rect.inset(CELL_PADDING);
                    let (head, rest) = inner.split_top(inner.height * CELL_HEADING_FRACTION);

                    elements.push(TextBoxDescriptor {
                        role: ElementRole::Cell,
                        text: String::new(),
                        rect: cell.rect,
                        font_size: bounds.min,
                        fits: true,
                        color: palette.body.clone(),
                        fill: Some(palette.cell_fill.clone()),
                        line: Some(palette.accent.clone()),
                        bullet: false,
                    });
                    elements.push(self.place_text(
                        ElementRole::CellHeading,
                        item.heading.trim(),
                        head,
                        bounds,
                        &palette.title,
                    ));
                    if !item.body.trim().is_empty() {
                        elements.push(self.place_text(
                            ElementRole::CellBody,
                            item.body.trim(),
                            rest,
                            bounds,
                            &palette.body,
                        ));
                    }
                }
                elements
            })
            .collect()
    }

    // ── helpers ─────────────────────────────────────────────────────────────

    fn title_only(&self, title: &str, band: Rect, continuation: bool) -> Vec<TextBoxDescriptor> {
        let title = title.trim();
        if title.is_empty() {
            return Vec::new();
        }
        let text = if continuation {
            format!("{title} (cont.)")
        } else {
            title.to_string()
        };
        vec![self.place_text(
            ElementRole::Title,
            &text,
            band,
            self.title_bounds(),
            &self.settings.palette.title,
        )]
    }

    /// Fits `text` into `rect`, truncating to the container when nothing fits.
    fn place_text(
        &self,
        role: ElementRole,
        text: &str,
        rect: Rect,
        bounds: FontBounds,
        color: &str,
    ) -> TextBoxDescriptor {
        let fitted = fit_paragraph(text, rect.width, rect.height, bounds, self.metrics);
        let text = if fitted.fits {
            text.to_string()
        } else {
            debug!(?role, font_size = fitted.font_size, "Text does not fit; truncating");
            truncate_to_container(
                &fitted.text(),
                rect.width,
                rect.height,
                fitted.font_size,
                self.metrics,
            )
        };

        TextBoxDescriptor {
            role,
            text,
            rect,
            font_size: fitted.font_size,
            fits: fitted.fits,
            color: color.to_string(),
            fill: None,
            line: None,
            bullet: false,
        }
    }

    /// Clamps into the safe area, then onto the canvas.
    fn finalize(&self, mut element: TextBoxDescriptor) -> TextBoxDescriptor {
        let clamped = validate_position(
            clamp_within(element.rect, &self.safe_area),
            &self.settings.layout,
        );
        if !self.safe_area.contains(&element.rect) {
            debug!(
                role = ?element.role,
                from = ?element.rect,
                to = ?clamped,
                "Element clamped into safe area"
            );
        }
        element.rect = clamped;
        element
    }
}
