/// Poster lookups through this crate's own proxy (`GET /api/poster`).
///
/// The client-side provider: it knows the proxy's address and nothing about
/// the metadata service behind it.
use crate::{
    error::{AppError, AppResult},
    models::PosterResponse,
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct ProxyPosterProvider {
    http_client: HttpClient,
    base_url: String,
}

impl ProxyPosterProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PosterProvider for ProxyPosterProvider {
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>> {
        let response = self
            .http_client
            .get(format!("{}/api/poster", self.base_url))
            .query(&[("title", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Poster proxy returned status {}: {}",
                status, body
            )));
        }

        let poster: PosterResponse = response.json().await?;
        Ok(poster.poster)
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}
