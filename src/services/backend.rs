/// Recommendation backend client
///
/// The backend owns search and every recommendation algorithm; this side only
/// knows the two endpoints and the shape of what they return.
use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRequest, RecommendationResponse, SearchResult},
};
use reqwest::{Client as HttpClient, Response, StatusCode};

/// Trait for the recommendation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Title search used by the autocomplete dropdown (`GET /api/search`)
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>>;

    /// Recommendations for a user or a movie (`POST /api/recommend`)
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse>;
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), base_url)
    }

    pub fn with_client(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a non-2xx backend response into an error carrying the server's reason
async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::Backend {
        status: status.as_u16(),
        message: error_message(&body),
    }
}

/// The backend reports failures as `{"error": ...}` or `{"message": ...}`
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let response = self
            .http_client
            .get(self.url("/api/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let results: Vec<SearchResult> = response.json().await?;

        tracing::debug!(
            query = %query,
            results = results.len(),
            "Title search completed"
        );

        Ok(results)
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let response = self
            .http_client
            .post(self.url("/api/recommend"))
            .json(request)
            .send()
            .await?;

        // The backend answers 404 when it has nothing to offer, which is an
        // empty result rather than a failure
        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!(request = %request, "Backend found no recommendations");
            return Ok(RecommendationResponse::default());
        }

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let recommendations: RecommendationResponse = response.json().await?;

        tracing::info!(
            request = %request,
            hybrid = recommendations.hybrid.as_ref().map_or(0, Vec::len),
            similar = recommendations.similar_movies.as_ref().map_or(0, Vec::len),
            collaborative = recommendations.collaborative.as_ref().map_or(0, Vec::len),
            "Recommendations fetched"
        );

        Ok(recommendations)
    }
}
