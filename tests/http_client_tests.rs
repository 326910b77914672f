use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use movie_rec_client::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{MovieId, RecommendationRequest, RecommendationResponse},
    services::{
        HttpBackend, OmdbProvider, PosterProvider, ProxyPosterProvider, RecommendationBackend,
    },
    ui::{AutocompleteSettings, ClientApp, Poster},
};

/// Serves `router` on an ephemeral local port and returns its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Recommendation backend with the real server's status codes and error bodies
/// that records every JSON body posted to it
#[derive(Clone, Default)]
struct StubBackend {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn stub_search(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let query = params.get("q").cloned().unwrap_or_default();
    if query == "crash" {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "  Internal Server Error\n".to_string()));
    }
    Ok(Json(json!([{ "movieId": 1, "title": query }])))
}

async fn stub_recommend(
    State(stub): State<StubBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.bodies.lock().unwrap().push(body.clone());

    match body.get("userId").and_then(Value::as_str) {
        Some("404") => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No recommendations found" })),
        ),
        Some("abc") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "User ID must be a valid integer" })),
        ),
        Some(_) => (
            StatusCode::OK,
            Json(json!({
                "hybrid": [
                    { "movieId": 6, "title": "Heat (1995)", "score": 4.5 },
                    { "movieId": 9, "title": "Sudden Death (1995)", "score": 3.1 }
                ]
            })),
        ),
        None => (
            StatusCode::OK,
            Json(json!({
                "similar_movies": [{ "movieId": 3114, "title": "Toy Story 2 (1999)", "similarity": 0.4 }]
            })),
        ),
    }
}

async fn stub_backend() -> (String, StubBackend) {
    let stub = StubBackend::default();
    let router = Router::new()
        .route("/api/search", get(stub_search))
        .route("/api/recommend", post(stub_recommend))
        .with_state(stub.clone());
    (serve(router).await, stub)
}

struct FakePosters;

#[async_trait::async_trait]
impl PosterProvider for FakePosters {
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>> {
        match title {
            "Heat" => Ok(Some("https://img.example/heat.jpg".to_string())),
            "Broken" => Err(AppError::ExternalApi("OMDb returned status 503".to_string())),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

async fn poster_proxy() -> String {
    serve(create_router(AppState::new(Arc::new(FakePosters)))).await
}

/// OMDb lookalike: one title with artwork, one without, and an outage
async fn stub_omdb(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("apikey").map(String::as_str) != Some("secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "Response": "False", "Error": "Invalid API key!" })),
        );
    }

    match params.get("t").map(String::as_str) {
        Some("Heat") => (
            StatusCode::OK,
            Json(json!({ "Title": "Heat", "Poster": "https://m.media-amazon.com/heat.jpg", "Response": "True" })),
        ),
        Some("Down") => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
        _ => (
            StatusCode::OK,
            Json(json!({ "Response": "False", "Error": "Movie not found!" })),
        ),
    }
}

#[tokio::test]
async fn test_search_query_is_url_encoded() {
    let (url, _) = stub_backend().await;
    let backend = HttpBackend::new(url);

    let results = backend.search("a&b c").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "a&b c");
    assert_eq!(results[0].movie_id, MovieId::from(1));
}

#[tokio::test]
async fn test_search_failure_carries_raw_body() {
    let (url, _) = stub_backend().await;
    let backend = HttpBackend::new(url);

    let err = backend.search("crash").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Backend returned status 500: Internal Server Error"
    );
}

#[tokio::test]
async fn test_recommend_posts_single_key_bodies() {
    let (url, stub) = stub_backend().await;
    let backend = HttpBackend::new(url);

    backend
        .recommend(&RecommendationRequest::User("42".to_string()))
        .await
        .unwrap();
    let similar = backend
        .recommend(&RecommendationRequest::Movie(MovieId::from(7)))
        .await
        .unwrap();

    assert_eq!(
        *stub.bodies.lock().unwrap(),
        vec![json!({ "userId": "42" }), json!({ "movieId": "7" })]
    );
    assert_eq!(similar.similar_movies.unwrap()[0].title, "Toy Story 2 (1999)");
}

#[tokio::test]
async fn test_recommend_not_found_is_empty_response() {
    let (url, _) = stub_backend().await;
    let backend = HttpBackend::new(url);

    let response = backend
        .recommend(&RecommendationRequest::User("404".to_string()))
        .await
        .unwrap();

    assert_eq!(response, RecommendationResponse::default());
}

#[tokio::test]
async fn test_recommend_bad_request_surfaces_error_field() {
    let (url, _) = stub_backend().await;
    let backend = HttpBackend::new(url);

    let err = backend
        .recommend(&RecommendationRequest::User("abc".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Backend { status: 400, .. }));
    assert_eq!(
        err.to_string(),
        "Backend returned status 400: User ID must be a valid integer"
    );
}

#[tokio::test]
async fn test_proxy_provider_reads_poster_reply() {
    let posters = ProxyPosterProvider::new(poster_proxy().await);

    assert_eq!(
        posters.poster_url("Heat (1995)").await.unwrap(),
        Some("https://img.example/heat.jpg".to_string())
    );
    assert_eq!(posters.poster_url("Obscure Short").await.unwrap(), None);
}

#[tokio::test]
async fn test_proxy_provider_upstream_failure_is_external_api_error() {
    let posters = ProxyPosterProvider::new(poster_proxy().await);

    let err = posters.poster_url("Broken").await.unwrap_err();

    match err {
        AppError::ExternalApi(message) => {
            assert!(message.contains("502"));
            assert!(message.contains("OMDb returned status 503"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_omdb_provider_over_http() {
    let url = serve(Router::new().route("/", get(stub_omdb))).await;
    let omdb = OmdbProvider::new("secret".to_string(), url.clone());

    assert_eq!(
        omdb.poster_url("Heat").await.unwrap(),
        Some("https://m.media-amazon.com/heat.jpg".to_string())
    );
    assert_eq!(omdb.poster_url("Nothing Here").await.unwrap(), None);
    assert!(matches!(
        omdb.poster_url("Down").await,
        Err(AppError::ExternalApi(_))
    ));

    let wrong_key = OmdbProvider::new("stolen".to_string(), url);
    assert!(matches!(
        wrong_key.poster_url("Heat").await,
        Err(AppError::ExternalApi(_))
    ));
}

#[tokio::test]
async fn test_client_against_live_backend_and_proxy() {
    let (backend_url, _) = stub_backend().await;
    let app = ClientApp::new(
        Arc::new(HttpBackend::new(backend_url)),
        Arc::new(ProxyPosterProvider::new(poster_proxy().await)),
        AutocompleteSettings::default(),
    );

    app.panel.recommend_for_user("404").await.unwrap();
    let html = app.panel.to_html();
    assert!(html.contains(r#"<div class="alert alert-info">No recommendations found</div>"#));
    assert!(!html.contains("alert-danger"));

    app.panel.recommend_for_user("abc").await.unwrap();
    assert_eq!(
        app.panel.view().error(),
        Some("Backend returned status 400: User ID must be a valid integer")
    );

    app.panel.recommend_for_user("42").await.unwrap();
    app.panel.wait_for_posters().await;

    let view = app.panel.view();
    let results = view.results().unwrap();
    assert_eq!(
        results.card(0, 0).unwrap().poster,
        Poster::Image("https://img.example/heat.jpg".to_string())
    );
    assert!(results.card(0, 1).unwrap().poster.is_placeholder());
}
