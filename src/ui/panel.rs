use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;

use crate::{
    models::{MovieId, RecommendationRequest},
    services::{clean_title, PosterProvider, RecommendationBackend},
};

use super::{
    autocomplete::Selection,
    lock,
    page::Page,
    render::{render, Poster, ResultsView},
};

/// Input problems caught before any request is made. The message is what the
/// user sees in the alert.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Please enter a User ID")]
    MissingUserId,

    #[error("Please select a movie from the search results")]
    NoMovieSelected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelContent {
    #[default]
    Empty,
    Results(ResultsView),
    /// The request failed; holds the reason shown after `Error: `
    Error(String),
}

/// What the recommendation area currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelView {
    pub loading: bool,
    pub content: PanelContent,
}

impl PanelView {
    pub fn results(&self) -> Option<&ResultsView> {
        match &self.content {
            PanelContent::Results(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.content {
            PanelContent::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct PanelState {
    view: PanelView,
    /// Token of the most recent request; only its response may touch the view
    generation: u64,
}

/// The recommendation area: two trigger actions, one request path, and the
/// rendered results with their poster enrichment.
pub struct RecommendationPanel {
    page: Arc<Page>,
    backend: Arc<dyn RecommendationBackend>,
    posters: Arc<dyn PosterProvider>,
    selection: Selection,
    state: Arc<Mutex<PanelState>>,
    enrichment: Mutex<JoinSet<()>>,
}

impl RecommendationPanel {
    pub fn new(
        page: Arc<Page>,
        backend: Arc<dyn RecommendationBackend>,
        posters: Arc<dyn PosterProvider>,
        selection: Selection,
    ) -> Self {
        Self {
            page,
            backend,
            posters,
            selection,
            state: Arc::new(Mutex::new(PanelState::default())),
            enrichment: Mutex::new(JoinSet::new()),
        }
    }

    /// Recommendations for the user id typed into the user field
    pub async fn recommend_for_user(&self, user_id: &str) -> Result<(), PanelError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(self.reject(PanelError::MissingUserId));
        }

        self.fetch_recommendations(RecommendationRequest::User(user_id.to_string()))
            .await;
        Ok(())
    }

    /// Movies similar to the one picked in the search dropdown
    pub async fn recommend_similar(&self) -> Result<(), PanelError> {
        let Some(movie_id) = self.selection.get() else {
            return Err(self.reject(PanelError::NoMovieSelected));
        };

        self.fetch_recommendations(RecommendationRequest::Movie(movie_id))
            .await;
        Ok(())
    }

    fn reject(&self, error: PanelError) -> PanelError {
        self.page.alert(error.to_string());
        error
    }

    /// Sends one recommendation request and replaces whatever the panel showed.
    ///
    /// Failures end up in the view as an inline error, never as a return value.
    /// A response that arrives after a newer request was started is dropped.
    pub async fn fetch_recommendations(&self, request: RecommendationRequest) {
        let token = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.view.loading = true;
            state.view.content = PanelContent::Empty;
            state.generation
        };

        // Dropping the previous set aborts lookups for cards that are gone
        let previous = std::mem::take(&mut *lock(&self.enrichment));
        drop(previous);

        tracing::info!(token = token, request = %request, "Requesting recommendations");

        let outcome = self.backend.recommend(&request).await;

        let cards = {
            let mut state = lock(&self.state);
            if state.generation != token {
                tracing::debug!(
                    token = token,
                    latest = state.generation,
                    "Discarding stale recommendation response"
                );
                return;
            }
            state.view.loading = false;

            match outcome {
                Ok(response) => {
                    let results = render(&response);
                    let cards: Vec<((usize, usize), String)> = results
                        .cards()
                        .map(|(position, card)| (position, card.title.clone()))
                        .collect();
                    tracing::info!(
                        token = token,
                        sections = results.sections.len(),
                        cards = cards.len(),
                        "Recommendations rendered"
                    );
                    state.view.content = PanelContent::Results(results);
                    cards
                }
                Err(e) => {
                    tracing::error!(token = token, error = %e, "Recommendation request failed");
                    state.view.content = PanelContent::Error(e.to_string());
                    return;
                }
            }
        };

        self.enrich_posters(token, cards);
    }

    /// Starts one poster lookup per card. Each lookup only ever touches its
    /// own card, and only while the render it belongs to is still current.
    fn enrich_posters(&self, token: u64, cards: Vec<((usize, usize), String)>) {
        let mut tasks = lock(&self.enrichment);

        for ((section, index), title) in cards {
            let posters = Arc::clone(&self.posters);
            let state = Arc::clone(&self.state);

            tasks.spawn(async move {
                let lookup_title = clean_title(&title);
                match posters.poster_url(&lookup_title).await {
                    Ok(Some(url)) => {
                        let mut state = lock(&state);
                        if state.generation != token {
                            return;
                        }
                        if let PanelContent::Results(results) = &mut state.view.content {
                            if let Some(card) = results.card_mut(section, index) {
                                card.poster = Poster::Image(url);
                            }
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(title = %lookup_title, "No poster available");
                    }
                    Err(e) => {
                        tracing::warn!(
                            title = %title,
                            error = %e,
                            provider = posters.name(),
                            "Failed to fetch poster"
                        );
                    }
                }
            });
        }
    }

    /// Waits until every poster lookup of the current render has finished
    pub async fn wait_for_posters(&self) {
        let mut tasks = std::mem::take(&mut *lock(&self.enrichment));
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Poster task join error");
                }
            }
        }
    }

    /// Clicking a card shows its movie id
    pub fn click_card(&self, section: usize, index: usize) -> Option<MovieId> {
        let movie_id = lock(&self.state)
            .view
            .results()
            .and_then(|results| results.card(section, index))
            .map(|card| card.movie_id.clone())?;

        self.page.alert(format!("Movie ID: {}", movie_id));
        Some(movie_id)
    }

    pub fn view(&self) -> PanelView {
        lock(&self.state).view.clone()
    }

    pub fn to_html(&self) -> String {
        lock(&self.state).view.to_html()
    }
}
