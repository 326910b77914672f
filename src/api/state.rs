use std::sync::Arc;

use crate::services::PosterProvider;

/// Shared state of the poster proxy
#[derive(Clone)]
pub struct AppState {
    pub posters: Arc<dyn PosterProvider>,
}

impl AppState {
    /// Creates proxy state backed by the given poster provider
    pub fn new(posters: Arc<dyn PosterProvider>) -> Self {
        Self { posters }
    }
}
