/// Poster artwork provider abstraction
///
/// Posters are best-effort decoration for recommendation cards. Two providers
/// implement the same lookup: `OmdbProvider` talks to the metadata service and
/// holds its API key, so it only runs inside the proxy; `ProxyPosterProvider`
/// is what the client uses and never sees the key.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppResult;

pub mod omdb;
pub mod proxy;

pub use omdb::OmdbProvider;
pub use proxy::ProxyPosterProvider;

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").expect("year suffix pattern is valid"));

/// Trait for poster lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Look up the poster URL for a title.
    ///
    /// `Ok(None)` means the lookup worked but there is no usable artwork.
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Strips the trailing release year the catalogue appends to titles,
/// e.g. `"Heat (1995)"` becomes `"Heat"`.
pub fn clean_title(title: &str) -> String {
    YEAR_SUFFIX.replace(title, "").trim().to_string()
}
