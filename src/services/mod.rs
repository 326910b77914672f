pub mod backend;
pub mod providers;

pub use backend::{HttpBackend, RecommendationBackend};
pub use providers::{clean_title, OmdbProvider, PosterProvider, ProxyPosterProvider};
