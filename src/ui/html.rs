//! HTML serialization of the client views.
//!
//! Markup and class names match the stylesheet of the recommendation page.

use super::{
    autocomplete::Dropdown,
    panel::{PanelContent, PanelView},
    render::{Card, ResultsView, Section},
};

/// Card titles longer than this are cut for display
pub const TITLE_DISPLAY_LEN: usize = 30;

/// Escape HTML characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Cuts `title` to `max` characters followed by `...`
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let cut: String = title.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

impl Dropdown {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div class="search-results" style="display: {}">"#,
            display(self.visible)
        );
        for item in &self.items {
            html.push_str(&format!(
                r#"<div class="search-item" data-movie-id="{}">{}</div>"#,
                html_escape(item.movie_id.as_str()),
                html_escape(&item.title)
            ));
        }
        html.push_str("</div>");
        html
    }
}

fn card_html(card: &Card) -> String {
    format!(
        concat!(
            r#"<div class="movie-card" data-movie-id="{id}">"#,
            r#"<div class="movie-poster" style="background: center/cover url('{poster}')"></div>"#,
            r#"<div class="movie-info">"#,
            r#"<div class="movie-title" title="{full_title}">{title}</div>"#,
            r#"<div class="movie-meta"><span class="score-badge">{score} Match</span></div>"#,
            r#"</div></div>"#,
        ),
        id = html_escape(card.movie_id.as_str()),
        poster = html_escape(card.poster.url()),
        full_title = html_escape(&card.title),
        title = html_escape(&truncate_title(&card.title, TITLE_DISPLAY_LEN)),
        score = html_escape(&card.score_label),
    )
}

fn section_html(section: &Section) -> String {
    let cards: String = section.cards.iter().map(card_html).collect();
    format!(
        r#"<h3 class="mb-3 text-white">{}</h3><div class="movie-grid">{}</div><hr class="my-5 border-secondary">"#,
        html_escape(section.heading()),
        cards
    )
}

impl ResultsView {
    pub fn to_html(&self) -> String {
        let mut html: String = self.sections.iter().map(section_html).collect();
        if let Some(notice) = &self.notice {
            html.push_str(&format!(
                r#"<div class="alert alert-info">{}</div>"#,
                html_escape(notice)
            ));
        }
        html
    }
}

impl PanelView {
    /// The loading indicator followed by the recommendations container
    pub fn to_html(&self) -> String {
        let content = match &self.content {
            PanelContent::Empty => String::new(),
            PanelContent::Results(results) => results.to_html(),
            PanelContent::Error(reason) => format!(
                r#"<div class="alert alert-danger">Error: {}</div>"#,
                html_escape(reason)
            ),
        };

        format!(
            r#"<div id="loading" style="display: {}"></div><div id="recommendationsContainer">{}</div>"#,
            display(self.loading),
            content
        )
    }
}
