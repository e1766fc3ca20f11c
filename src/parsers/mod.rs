pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::error::CrawlError;
use scraper::{Html, Selector};
use url::Url;

/// Tags dropped from the document before heuristic text extraction
pub const STRIPPED_TAGS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Default number of characters kept by heuristic extraction
pub const DEFAULT_CONTENT_LIMIT: usize = 2000;

/// How page content is extracted
#[derive(Debug, Clone)]
pub enum ContentPolicy {
    /// Concatenate the text of every element matched by each selector, in order
    Selectors(Vec<Selector>),
    /// Visible body text minus boilerplate tags, truncated to `limit` characters
    Heuristic { limit: usize },
}

impl ContentPolicy {
    /// Builds the policy for an optional selector list.
    ///
    /// `None` or an empty list selects heuristic extraction. Every selector is
    /// compiled up front so a typo fails the crawl before any page is rendered.
    pub fn new(selectors: Option<&[String]>, limit: usize) -> Result<Self, CrawlError> {
        match selectors {
            Some(list) if !list.is_empty() => {
                let compiled = list
                    .iter()
                    .map(|s| {
                        Selector::parse(s).map_err(|e| CrawlError::InvalidSelector {
                            selector: s.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ContentPolicy::Selectors(compiled))
            }
            _ => Ok(ContentPolicy::Heuristic { limit }),
        }
    }
}

/// Result of parsing a rendered document
pub struct ParseResult {
    /// Extracted text content (untrimmed)
    pub content: String,
    /// Absolute links found on the page, in document order
    pub links: Vec<String>,
}

/// Parses a rendered document, extracting content per `policy` and, when
/// `with_links` is set, every anchor href resolved against the document base.
///
/// `location` is where the browser ended up, after any redirect.
pub fn parse(
    html_source: &str,
    location: &str,
    policy: &ContentPolicy,
    with_links: bool,
) -> ParseResult {
    let doc = Html::parse_document(html_source);

    let content = match policy {
        ContentPolicy::Selectors(selectors) => html::selected_text(&doc, selectors),
        ContentPolicy::Heuristic { limit } => {
            let visible = text::visible_body_text(&doc, &STRIPPED_TAGS);
            text::truncate_chars(&visible, *limit)
        }
    };

    let links = if with_links {
        match Url::parse(location) {
            Ok(url) => html::resolved_links(&doc, &html::document_base(&doc, &url)),
            Err(e) => {
                ::log::debug!("Cannot resolve links against {}: {}", location, e);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    ParseResult { content, links }
}
