use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a movie as understood by the recommendation backend.
///
/// The backend emits numeric ids, but the client only ever echoes them back,
/// so the id is kept as an opaque string and posted as one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMovieId", into = "String")]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMovieId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawMovieId> for MovieId {
    fn from(raw: RawMovieId) -> Self {
        match raw {
            RawMovieId::Number(n) => Self(n.to_string()),
            RawMovieId::Text(s) => Self(s),
        }
    }
}

// ============================================================================
// Recommendation backend types
// ============================================================================

/// One row returned by `GET /api/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
}

/// Body of `POST /api/recommend`: exactly one of `userId` or `movieId`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RecommendationRequest {
    #[serde(rename = "userId")]
    User(String),
    #[serde(rename = "movieId")]
    Movie(MovieId),
}

impl Display for RecommendationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationRequest::User(id) => write!(f, "user:{}", id),
            RecommendationRequest::Movie(id) => write!(f, "movie:{}", id),
        }
    }
}

/// A single ranked movie inside one of the recommendation lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntry {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    /// Predicted rating, present on collaborative and hybrid lists
    #[serde(default)]
    pub score: Option<f64>,
    /// Cosine similarity, present on content-based lists
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// Response of `POST /api/recommend`.
///
/// Every list is optional and keys the client does not know about
/// (`error`, `message`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborative: Option<Vec<MovieEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid: Option<Vec<MovieEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_movies: Option<Vec<MovieEntry>>,
}

// ============================================================================
// Poster metadata types
// ============================================================================

/// Raw OMDb lookup response; only the fields needed for artwork
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbTitle {
    /// The poster URL if OMDb found the title and has artwork for it
    pub fn poster_url(&self) -> Option<&str> {
        if self.response != "True" {
            return None;
        }
        self.poster
            .as_deref()
            .filter(|url| *url != "N/A" && !url.trim().is_empty())
    }
}

/// Response of the poster proxy, `GET /api/poster`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterResponse {
    pub title: String,
    pub poster: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_id_accepts_numbers_and_strings() {
        let from_number: MovieId = serde_json::from_value(json!(318)).unwrap();
        let from_string: MovieId = serde_json::from_value(json!("318")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "318");
    }

    #[test]
    fn test_recommendation_request_serializes_single_key() {
        let user = serde_json::to_value(RecommendationRequest::User("42".to_string())).unwrap();
        assert_eq!(user, json!({ "userId": "42" }));

        let movie = serde_json::to_value(RecommendationRequest::Movie(MovieId::from(1))).unwrap();
        assert_eq!(movie, json!({ "movieId": "1" }));
    }

    #[test]
    fn test_recommendation_response_ignores_unknown_keys() {
        let response: RecommendationResponse =
            serde_json::from_value(json!({ "message": "No recommendations found" })).unwrap();
        assert_eq!(response, RecommendationResponse::default());
    }

    #[test]
    fn test_recommendation_response_deserialization() {
        let json = r#"{
            "hybrid": [{"movieId": 1, "title": "Toy Story (1995)", "score": 4.6}],
            "similar_movies": [{"movieId": 2, "title": "Jumanji (1995)", "similarity": 0.41}]
        }"#;

        let response: RecommendationResponse = serde_json::from_str(json).unwrap();
        let hybrid = response.hybrid.unwrap();
        assert_eq!(hybrid[0].movie_id, MovieId::from(1));
        assert_eq!(hybrid[0].score, Some(4.6));
        assert_eq!(hybrid[0].similarity, None);

        let similar = response.similar_movies.unwrap();
        assert_eq!(similar[0].similarity, Some(0.41));
        assert!(response.collaborative.is_none());
    }

    #[test]
    fn test_omdb_poster_url() {
        let found: OmdbTitle = serde_json::from_value(json!({
            "Title": "Heat",
            "Response": "True",
            "Poster": "https://m.media-amazon.com/images/heat.jpg"
        }))
        .unwrap();
        assert_eq!(
            found.poster_url(),
            Some("https://m.media-amazon.com/images/heat.jpg")
        );

        let no_art: OmdbTitle =
            serde_json::from_value(json!({ "Response": "True", "Poster": "N/A" })).unwrap();
        assert_eq!(no_art.poster_url(), None);

        let missing: OmdbTitle =
            serde_json::from_value(json!({ "Response": "False", "Error": "Movie not found!" }))
                .unwrap();
        assert_eq!(missing.poster_url(), None);
    }
}
