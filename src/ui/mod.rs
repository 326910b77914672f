//! Headless client views for the recommendation page.
//!
//! Widgets own their state explicitly and expose what they display as plain
//! values; `html` turns those values into the page markup.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    config::Config,
    services::{HttpBackend, PosterProvider, ProxyPosterProvider, RecommendationBackend},
};

pub mod autocomplete;
pub mod html;
pub mod page;
pub mod panel;
pub mod render;

pub use autocomplete::{AutocompleteSettings, AutocompleteWidget, Dropdown, Selection};
pub use page::{ClickTarget, Page};
pub use panel::{PanelContent, PanelError, PanelView, RecommendationPanel};
pub use render::{render, Card, Category, Poster, ResultsView, Section};

/// Id of the element wrapping the search input and its dropdown
pub const SEARCH_CONTAINER_ID: &str = "searchContainer";

/// UI state stays usable even if a holder panicked mid-update
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The whole client: one page with the search widget and the recommendation
/// panel sharing a selection.
pub struct ClientApp {
    pub page: Arc<Page>,
    pub search: AutocompleteWidget,
    pub panel: RecommendationPanel,
}

impl ClientApp {
    pub fn new(
        backend: Arc<dyn RecommendationBackend>,
        posters: Arc<dyn PosterProvider>,
        settings: AutocompleteSettings,
    ) -> Self {
        let page = Arc::new(Page::new());
        let selection = Selection::new();

        let search = AutocompleteWidget::attach(
            &page,
            SEARCH_CONTAINER_ID,
            Arc::clone(&backend),
            selection.clone(),
            settings,
        );
        tracing::info!(poster_provider = posters.name(), "App loaded");
        let panel = RecommendationPanel::new(Arc::clone(&page), backend, posters, selection);

        Self {
            page,
            search,
            panel,
        }
    }

    /// Builds the client against the configured backend and poster proxy
    pub fn from_config(config: &Config) -> Self {
        let backend = Arc::new(HttpBackend::new(config.backend_url.clone()));
        let posters = Arc::new(ProxyPosterProvider::new(config.poster_proxy_url.clone()));
        Self::new(backend, posters, config.autocomplete_settings())
    }
}
