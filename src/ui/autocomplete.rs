use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::{
    models::{MovieId, SearchResult},
    services::RecommendationBackend,
};

use super::{lock, page::Page};

/// Timing and length rules for autocomplete lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocompleteSettings {
    /// Idle time after the last keystroke before a lookup is sent
    pub debounce: Duration,
    /// Queries shorter than this (in characters) never reach the backend
    pub min_query_len: usize,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 2,
        }
    }
}

/// The movie picked from the dropdown, shared between the search widget that
/// writes it and the recommendation panel that reads it.
#[derive(Debug, Clone, Default)]
pub struct Selection(Arc<Mutex<Option<MovieId>>>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, movie_id: MovieId) {
        *lock(&self.0) = Some(movie_id);
    }

    pub fn get(&self) -> Option<MovieId> {
        lock(&self.0).clone()
    }
}

/// The results dropdown under the search input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dropdown {
    pub visible: bool,
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Default)]
struct WidgetState {
    input: String,
    dropdown: Dropdown,
}

/// Search box with a debounced autocomplete dropdown
pub struct AutocompleteWidget {
    container_id: String,
    backend: Arc<dyn RecommendationBackend>,
    selection: Selection,
    settings: AutocompleteSettings,
    state: Arc<Mutex<WidgetState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutocompleteWidget {
    /// Creates the widget inside `container_id` and installs its page-wide
    /// click listener, which hides the dropdown on clicks outside the container.
    pub fn attach(
        page: &Page,
        container_id: impl Into<String>,
        backend: Arc<dyn RecommendationBackend>,
        selection: Selection,
        settings: AutocompleteSettings,
    ) -> Self {
        let container_id = container_id.into();
        let state = Arc::new(Mutex::new(WidgetState::default()));

        let listener_state = Arc::downgrade(&state);
        let listener_container = container_id.clone();
        page.on_click(move |target| {
            if target.is_within(&listener_container) {
                return;
            }
            if let Some(state) = listener_state.upgrade() {
                lock(&state).dropdown.visible = false;
            }
        });

        tracing::info!(
            container = %container_id,
            debounce_ms = settings.debounce.as_millis() as u64,
            "Autocomplete attached"
        );

        Self {
            container_id,
            backend,
            selection,
            settings,
            state,
            pending: Mutex::new(None),
        }
    }

    /// Handles a change of the input text.
    ///
    /// Cancels any lookup still waiting out the debounce (or in flight) and,
    /// for long enough queries, schedules a new one. Must be called from
    /// within a Tokio runtime.
    pub fn on_input(&self, text: &str) {
        let mut pending = lock(&self.pending);
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        {
            let mut state = lock(&self.state);
            state.input = text.to_string();
            if text.chars().count() < self.settings.min_query_len {
                state.dropdown.visible = false;
                return;
            }
        }

        let query = text.to_string();
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let debounce = self.settings.debounce;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let items = match backend.search(&query).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Title search failed");
                    Vec::new()
                }
            };

            let mut state = lock(&state);
            state.dropdown.visible = !items.is_empty();
            state.dropdown.items = items;
        }));
    }

    /// Picks a row of the visible dropdown: fills the input with its title,
    /// remembers its id and closes the dropdown.
    pub fn select(&self, index: usize) -> Option<SearchResult> {
        let item = {
            let mut state = lock(&self.state);
            if !state.dropdown.visible {
                return None;
            }
            let item = state.dropdown.items.get(index).cloned()?;
            state.input = item.title.clone();
            state.dropdown.visible = false;
            item
        };

        self.selection.set(item.movie_id.clone());
        tracing::debug!(movie_id = %item.movie_id, title = %item.title, "Movie selected");

        Some(item)
    }

    pub fn input(&self) -> String {
        lock(&self.state).input.clone()
    }

    pub fn dropdown(&self) -> Dropdown {
        lock(&self.state).dropdown.clone()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn to_html(&self) -> String {
        lock(&self.state).dropdown.to_html()
    }
}

impl Drop for AutocompleteWidget {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.pending).take() {
            handle.abort();
        }
    }
}
