use std::collections::HashSet;
use url::Url;

/// Computes the base domain of a URL: the last two dot-separated labels of its host.
///
/// This is not public-suffix aware, so `sub.example.co.uk` maps to `co.uk`.
/// Hosts with a single label are returned unchanged. Returns `None` when the
/// URL does not parse or has no host, which callers treat as "cannot scope".
pub fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(base_domain_of_host(host))
}

fn base_domain_of_host(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

/// Decides whether `candidate` should be followed from a page at `reference`.
///
/// Both URLs must parse and share a base domain, the candidate must use an
/// HTTP(S) scheme and it must not already be in `visited`.
pub fn is_internal(candidate: &str, reference: &str, visited: &HashSet<String>) -> bool {
    let Ok(candidate_url) = Url::parse(candidate) else {
        return false;
    };
    if Url::parse(reference).is_err() {
        return false;
    }

    let same_domain = match (base_domain(candidate), base_domain(reference)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    same_domain && candidate_url.scheme().starts_with("http") && !visited.contains(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_domain() {
        assert_eq!(
            base_domain("https://example.com").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            base_domain("https://sub.example.com/path"),
            base_domain("https://example.com")
        );

        // Multi-label public suffixes collapse to the suffix itself
        assert_eq!(
            base_domain("https://sub.example.co.uk/").as_deref(),
            Some("co.uk")
        );

        // Single-label hosts are returned as-is
        assert_eq!(
            base_domain("http://localhost:8080/a").as_deref(),
            Some("localhost")
        );
    }

    #[test]
    fn test_base_domain_unparseable() {
        assert_eq!(base_domain("not a url"), None);
        assert_eq!(base_domain("/relative/path"), None);
        assert_eq!(base_domain("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_subdomains_are_internal() {
        let visited = HashSet::new();
        assert!(is_internal(
            "https://example.com/a",
            "https://shop.example.com",
            &visited
        ));
        assert!(is_internal(
            "http://blog.example.com/post",
            "https://example.com/",
            &visited
        ));
    }

    #[test]
    fn test_other_domain_is_external() {
        let visited = HashSet::new();
        assert!(!is_internal("https://other.org", "https://example.com", &visited));
    }

    #[test]
    fn test_visited_is_not_internal() {
        let mut visited = HashSet::new();
        visited.insert("https://example.com/a".to_string());
        assert!(!is_internal(
            "https://example.com/a",
            "https://example.com",
            &visited
        ));
        assert!(is_internal(
            "https://example.com/b",
            "https://example.com",
            &visited
        ));
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        let visited = HashSet::new();
        assert!(!is_internal(
            "ftp://example.com/file",
            "https://example.com",
            &visited
        ));
        assert!(!is_internal(
            "javascript:void(0)",
            "https://example.com",
            &visited
        ));
    }

    #[test]
    fn test_parse_failures_are_not_internal() {
        let visited = HashSet::new();
        assert!(!is_internal("::::", "https://example.com", &visited));
        assert!(!is_internal("https://example.com/a", "garbage", &visited));
    }
}
