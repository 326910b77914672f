use crate::models::{MovieEntry, MovieId, RecommendationResponse};

/// Shown instead of any section when the backend returned nothing usable
pub const NO_RECOMMENDATIONS: &str = "No recommendations found";

/// Content similarity lives in [0, 1] while predicted ratings are on a
/// different scale; this only lines the badges up visually.
const SIMILARITY_DISPLAY_SCALE: f64 = 50.0;

const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450/333/fff";

/// The recommendation lists the backend can return, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hybrid,
    Similar,
    Collaborative,
}

impl Category {
    pub const DISPLAY_ORDER: [Category; 3] =
        [Category::Hybrid, Category::Similar, Category::Collaborative];

    pub fn heading(self) -> &'static str {
        match self {
            Category::Hybrid => "Top Picks For You (Hybrid)",
            Category::Similar => "Because You Liked Certain Movies (Content)",
            Category::Collaborative => "Popular With Similar Users (Collaborative)",
        }
    }

    fn entries(self, response: &RecommendationResponse) -> Option<&[MovieEntry]> {
        let entries = match self {
            Category::Hybrid => response.hybrid.as_deref(),
            Category::Similar => response.similar_movies.as_deref(),
            Category::Collaborative => response.collaborative.as_deref(),
        };
        entries.filter(|entries| !entries.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Poster {
    /// Generated artwork shown until (and unless) a real poster arrives
    Placeholder(String),
    Image(String),
}

impl Poster {
    pub fn placeholder_for(title: &str) -> Self {
        Poster::Placeholder(format!(
            "{}?text={}",
            PLACEHOLDER_POSTER_URL,
            urlencoding::encode(title)
        ))
    }

    pub fn url(&self) -> &str {
        match self {
            Poster::Placeholder(url) | Poster::Image(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Poster::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub movie_id: MovieId,
    pub title: String,
    /// Score as displayed on the badge, one decimal place
    pub score_label: String,
    pub poster: Poster,
}

impl Card {
    fn from_entry(entry: &MovieEntry) -> Self {
        Self {
            movie_id: entry.movie_id.clone(),
            title: entry.title.clone(),
            score_label: score_label(entry),
            poster: Poster::placeholder_for(&entry.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub category: Category,
    pub cards: Vec<Card>,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        self.category.heading()
    }
}

/// Rendered recommendations: either one or more sections, or a notice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub sections: Vec<Section>,
    pub notice: Option<String>,
}

impl ResultsView {
    pub fn card(&self, section: usize, index: usize) -> Option<&Card> {
        self.sections.get(section)?.cards.get(index)
    }

    pub fn card_mut(&mut self, section: usize, index: usize) -> Option<&mut Card> {
        self.sections.get_mut(section)?.cards.get_mut(index)
    }

    /// Every card with its `(section, index)` position, in display order
    pub fn cards(&self) -> impl Iterator<Item = ((usize, usize), &Card)> {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            section
                .cards
                .iter()
                .enumerate()
                .map(move |(i, card)| ((s, i), card))
        })
    }
}

/// Lays a backend response out as sections of cards.
///
/// Empty or missing lists are skipped; entries keep the backend's ranking.
pub fn render(response: &RecommendationResponse) -> ResultsView {
    let sections: Vec<Section> = Category::DISPLAY_ORDER
        .iter()
        .filter_map(|&category| {
            category.entries(response).map(|entries| Section {
                category,
                cards: entries.iter().map(Card::from_entry).collect(),
            })
        })
        .collect();

    let notice = sections
        .is_empty()
        .then(|| NO_RECOMMENDATIONS.to_string());

    ResultsView { sections, notice }
}

/// Badge value for an entry: the predicted score when there is one,
/// otherwise the scaled similarity, otherwise zero.
///
/// A zero score counts as absent, so a zero-scored entry with a similarity
/// shows the similarity.
pub fn score_label(entry: &MovieEntry) -> String {
    let usable = |value: &f64| *value != 0.0 && !value.is_nan();

    let value = entry
        .score
        .filter(usable)
        .or_else(|| {
            entry
                .similarity
                .map(|similarity| similarity * SIMILARITY_DISPLAY_SCALE)
                .filter(usable)
        })
        .unwrap_or(0.0);

    format!("{:.1}", value)
}
