use digest_logging::digest_warn;
use scraper::{ElementRef, Html, Selector};

/// Log target of the structured-miss notice.
pub const NOTICE_TARGET: &str = "digest::notice";

/// Elements whose text is code or markup, never page prose.
const NON_PROSE_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Tags collected when a page has no `<article>` element.
pub const FALLBACK_TAGS: &[&str] = &["p", "div", "span", "h1", "h2", "h3", "h4", "h5", "h6", "li"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text of the first `<article>` element.
    Structured(String),
    /// Space-joined text of every fallback element, in document order.
    Fallback(String),
    /// Neither an article nor any fallback element was present.
    Empty,
}

impl Extraction {
    pub fn text(&self) -> &str {
        match self {
            Extraction::Structured(text) | Extraction::Fallback(text) => text,
            Extraction::Empty => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Extraction::Structured(text) | Extraction::Fallback(text) => text,
            Extraction::Empty => String::new(),
        }
    }
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Extraction;
}

/// Two-tier extractor:
/// - text of the first `<article>` if present
/// - otherwise the joined text of all paragraph, block, span, heading and list item elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleTextExtractor;

impl Extractor for ArticleTextExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let doc = Html::parse_document(html);

        if let Some(article) = Selector::parse("article")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
        {
            return Extraction::Structured(element_text(article));
        }

        digest_warn!(target: NOTICE_TARGET, "No <article> tag found on the page.");

        let Ok(fallback_sel) = Selector::parse(&FALLBACK_TAGS.join(", ")) else {
            return Extraction::Empty;
        };
        let parts: Vec<String> = doc.select(&fallback_sel).map(element_text).collect();
        if parts.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Fallback(parts.join(" "))
        }
    }
}

/// Descendant prose text nodes, each trimmed, empty ones dropped, joined by one space.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let inside_code = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != element.id())
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|el| NON_PROSE_TAGS.contains(&el.name()));
            (!inside_code).then(|| text.trim())
        })
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
