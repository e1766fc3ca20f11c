use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

static BASE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("base[href]").expect("static selector"));

/// Collects the trimmed text of every element matched by each selector.
///
/// Selectors are applied in order and elements in document order; each
/// non-empty text is followed by a newline.
pub fn selected_text(doc: &Html, selectors: &[Selector]) -> String {
    let mut content = String::new();
    for selector in selectors {
        for element in doc.select(selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                content.push_str(text);
                content.push('\n');
            }
        }
    }
    content
}

/// URL relative links on the document resolve against: the first
/// `<base href>` joined onto `location`, or `location` itself
pub fn document_base(doc: &Html, location: &Url) -> Url {
    doc.select(&BASE_SELECTOR)
        .next()
        .and_then(|e| e.value().attr("href"))
        .and_then(|href| location.join(href.trim()).ok())
        .unwrap_or_else(|| location.clone())
}

/// Resolves every anchor href against `base`, dropping the ones that fail
pub fn resolved_links(doc: &Html, base: &Url) -> Vec<String> {
    let links = doc
        .select(&LINK_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .map(|u| u.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links on {}", links.len(), base);
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
