/// OMDb poster provider
///
/// Looks a title up by name and returns its `Poster` field.
///
/// API Flow:
/// 1. `GET /?t=<title>&apikey=<key>` → `{ "Response": "True", "Poster": "<url>", ... }`
/// 2. `Response: "False"` or `Poster: "N/A"` means no artwork, not a failure
use crate::{
    error::{AppError, AppResult},
    models::OmdbTitle,
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn parse_lookup(title: &str, body: &str) -> AppResult<Option<String>> {
        let lookup: OmdbTitle = serde_json::from_str(body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        if let Some(reason) = lookup.error.as_deref().filter(|_| lookup.response != "True") {
            tracing::debug!(title = %title, reason = %reason, "OMDb has no match");
        }

        Ok(lookup.poster_url().map(str::to_string))
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
        }

        let response = self
            .http_client
            .get(format!("{}/", self.api_url))
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let poster = Self::parse_lookup(title, &body)?;

        tracing::info!(
            title = %title,
            found = poster.is_some(),
            provider = "omdb",
            "Poster lookup completed"
        );

        Ok(poster)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
