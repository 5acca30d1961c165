use crate::config::Config;
use crate::deck::models::DeckSettings;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The font-metric table is not stored here: it is a `static` and every fit call
/// borrows it through `layout::standard_metrics()`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Deck settings derived from `config`, used as the base for per-request overrides.
    pub deck_defaults: DeckSettings,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let deck_defaults = config.deck_settings();
        Self {
            config,
            deck_defaults,
        }
    }
}
