use crate::error::CrawlError;
use crate::parsers::{self, ContentPolicy, DEFAULT_CONTENT_LIMIT};

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<html>
<head><title>Article</title><style>body { color: red; }</style></head>
<body>
  <header>Site header</header>
  <nav><a href="/home">Home</a></nav>
  <h1>  Main heading </h1>
  <p>First paragraph.</p>
  <div><p>  Second
     paragraph. </p></div>
  <script>var hidden = "script text";</script>
  <footer>Copyright</footer>
</body>
</html>"#;

    fn selectors(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selector_extraction_in_document_order() {
        let list = selectors(&["h1", "p"]);
        let policy = ContentPolicy::new(Some(list.as_slice()), DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(ARTICLE, "https://example.com/a", &policy, false);
        assert_eq!(
            result.content,
            "Main heading\nFirst paragraph.\nSecond\n     paragraph.\n"
        );
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_selector_order_wins_over_document_order() {
        let list = selectors(&["p", "h1"]);
        let policy = ContentPolicy::new(Some(list.as_slice()), DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(ARTICLE, "https://example.com/a", &policy, false);
        assert!(result.content.ends_with("Main heading\n"));
        assert!(result.content.starts_with("First paragraph.\n"));
    }

    #[test]
    fn test_selector_skips_empty_elements() {
        let html = "<body><p>  </p><p>Text</p><p></p></body>";
        let list = selectors(&["p"]);
        let policy = ContentPolicy::new(Some(list.as_slice()), DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(html, "https://example.com/", &policy, false);
        assert_eq!(result.content, "Text\n");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let list = selectors(&["h1", "p[[["]);
        match ContentPolicy::new(Some(list.as_slice()), DEFAULT_CONTENT_LIMIT) {
            Err(CrawlError::InvalidSelector { selector, .. }) => assert_eq!(selector, "p[[["),
            other => panic!("expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_selector_list_falls_back_to_heuristic() {
        let policy = ContentPolicy::new(Some(&[][..]), 123).unwrap();
        assert!(matches!(policy, ContentPolicy::Heuristic { limit: 123 }));

        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        assert!(matches!(policy, ContentPolicy::Heuristic { limit: 2000 }));
    }

    #[test]
    fn test_heuristic_strips_boilerplate() {
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(ARTICLE, "https://example.com/a", &policy, false);
        assert_eq!(
            result.content,
            "Main heading\n\nFirst paragraph.\n\nSecond paragraph."
        );
        assert!(!result.content.contains("Site header"));
        assert!(!result.content.contains("Home"));
        assert!(!result.content.contains("script text"));
        assert!(!result.content.contains("Copyright"));
        assert!(!result.content.contains("color"));
    }

    #[test]
    fn test_heuristic_truncates_to_limit() {
        let body = "x".repeat(5000);
        let html = format!("<html><body><div>{}</div></body></html>", body);
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(&html, "https://example.com/", &policy, false);
        assert_eq!(result.content.chars().count(), 2000);
    }

    #[test]
    fn test_links_resolved_against_page_url() {
        let html = r#"<body>
            <a href="/about">About</a>
            <a href="team.html">Team</a>
            <a href="https://other.org/x">Other</a>
            <a href="http://[::1">Broken</a>
            <a>No href</a>
        </body>"#;
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(html, "https://example.com/docs/index.html", &policy, true);
        assert_eq!(
            result.links,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/docs/team.html".to_string(),
                "https://other.org/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_links_resolved_against_base_element() {
        let html = r#"<head><base href="https://example.com/docs/"></head>
            <body><a href="page">Page</a><a href="/root">Root</a></body>"#;
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(html, "https://example.com/index.html", &policy, true);
        assert_eq!(
            result.links,
            vec![
                "https://example.com/docs/page".to_string(),
                "https://example.com/root".to_string(),
            ]
        );
    }

    #[test]
    fn test_relative_base_element_joins_location() {
        let html = r#"<head><base href="v2/"><base href="/ignored/"></head>
            <body><a href="intro">Intro</a></body>"#;
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(html, "https://example.com/guide/", &policy, true);
        assert_eq!(result.links, vec!["https://example.com/guide/v2/intro".to_string()]);
    }

    #[test]
    fn test_links_only_when_requested() {
        let html = r#"<body><a href="/about">About</a></body>"#;
        let policy = ContentPolicy::new(None, DEFAULT_CONTENT_LIMIT).unwrap();
        let result = parsers::parse(html, "https://example.com/", &policy, false);
        assert!(result.links.is_empty());
        assert_eq!(result.content, "About");
    }
}
