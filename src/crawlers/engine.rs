use crate::config::CrawlConfig;
use crate::crawlers::renderer::{PageRenderer, RenderedPage};
use crate::error::{CrawlError, RenderError};
use crate::filter;
use crate::parsers::{self, ContentPolicy, DEFAULT_CONTENT_LIMIT};
use crate::results::{PageOutcome, PageRecord};
use std::collections::HashSet;
use std::time::Duration;

/// State owned by one traversal: the base domain fixed from the seed and
/// the set of URLs already scheduled.
#[derive(Debug, Clone, Default)]
pub struct CrawlSession {
    base_domain: Option<String>,
    visited: HashSet<String>,
}

impl CrawlSession {
    /// Start a session rooted at `seed`
    pub fn new(seed: &str) -> Self {
        Self {
            base_domain: filter::base_domain(seed),
            visited: HashSet::new(),
        }
    }

    /// Base domain of the seed, `None` when the seed does not parse
    pub fn base_domain(&self) -> Option<&str> {
        self.base_domain.as_deref()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records `url` as visited. Returns false if it already was.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }
}

/// Depth-bounded, same-site traversal over a page renderer
pub struct Crawler<R: PageRenderer> {
    renderer: R,
    link_budget: usize,
    navigation_timeout: Duration,
    content_limit: usize,
}

impl<R: PageRenderer> Crawler<R> {
    /// Create a crawler with the default link budget (10), navigation
    /// timeout (30s) and content limit (2000 characters)
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            link_budget: 10,
            navigation_timeout: Duration::from_secs(30),
            content_limit: DEFAULT_CONTENT_LIMIT,
        }
    }

    /// Create a crawler using the limits from `config`
    pub fn from_config(renderer: R, config: &CrawlConfig) -> Self {
        Self {
            renderer,
            link_budget: config.link_budget,
            navigation_timeout: config.navigation_timeout(),
            content_limit: config.content_limit,
        }
    }

    /// Set the maximum number of links followed from one page
    pub fn with_link_budget(mut self, link_budget: usize) -> Self {
        self.link_budget = link_budget;
        self
    }

    /// Set the per-page navigation timeout
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set how many characters heuristic extraction keeps
    pub fn with_content_limit(mut self, content_limit: usize) -> Self {
        self.content_limit = content_limit;
        self
    }

    /// Crawls from `seed` in a fresh session and returns every captured page
    /// in depth-first pre-order.
    ///
    /// Page failures are logged and skipped. An invalid selector is the one
    /// exception: it is compiled before the seed is rendered and fails the
    /// whole call with `CrawlError::InvalidSelector`, where failing each
    /// page in turn would only ever return an empty list.
    pub async fn crawl(
        &mut self,
        seed: &str,
        selectors: Option<&[String]>,
        max_depth: usize,
    ) -> Result<Vec<PageRecord>, CrawlError> {
        let policy = ContentPolicy::new(selectors, self.content_limit)?;
        let mut session = CrawlSession::new(seed);

        ::log::info!(
            "Starting crawl of {} (base domain {:?}, max depth {})",
            seed,
            session.base_domain(),
            max_depth
        );
        let start_time = std::time::Instant::now();

        let records = self
            .crawl_from(&mut session, seed, &policy, max_depth, 0)
            .await;

        ::log::info!(
            "Crawl complete - captured {} pages in {:.2} seconds",
            records.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(records)
    }

    /// Continues a traversal in an existing session, starting at `url` on
    /// `current_depth`.
    ///
    /// A URL already in the session, or a depth at or beyond `max_depth`,
    /// yields nothing and is never rendered.
    pub async fn crawl_from(
        &mut self,
        session: &mut CrawlSession,
        url: &str,
        policy: &ContentPolicy,
        max_depth: usize,
        current_depth: usize,
    ) -> Vec<PageRecord> {
        let mut records = Vec::new();
        // Children are pushed in reverse so they pop in link order
        let mut stack = vec![(url.to_string(), current_depth)];

        while let Some((url, depth)) = stack.pop() {
            if depth >= max_depth {
                ::log::trace!("Depth cap reached at {}", url);
                continue;
            }
            if !session.mark_visited(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }

            let expand = depth + 1 < max_depth;
            match self.visit(session, &url, policy, depth, expand).await {
                PageOutcome::Captured { record, links } => {
                    ::log::info!(
                        "Captured {} at depth {}, following {} links",
                        record.url,
                        depth,
                        links.len()
                    );
                    records.push(record);
                    stack.extend(links.into_iter().rev().map(|link| (link, depth + 1)));
                }
                PageOutcome::Failed { url, reason } => {
                    ::log::warn!("Error crawling {}: {}", url, reason);
                }
            }
        }

        records
    }

    /// Renders one page and closes it again whatever happens
    async fn visit(
        &mut self,
        session: &CrawlSession,
        url: &str,
        policy: &ContentPolicy,
        depth: usize,
        expand: bool,
    ) -> PageOutcome {
        let mut page = match self.renderer.open_page().await {
            Ok(page) => page,
            Err(e) => {
                return PageOutcome::Failed {
                    url: url.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let outcome = match self
            .capture(&mut page, session, url, policy, depth, expand)
            .await
        {
            Ok((record, links)) => PageOutcome::Captured { record, links },
            Err(e) => PageOutcome::Failed {
                url: url.to_string(),
                reason: e.to_string(),
            },
        };

        if let Err(e) = page.close().await {
            ::log::warn!("Failed to close page for {}: {}", url, e);
        }

        outcome
    }

    async fn capture(
        &self,
        page: &mut R::Page,
        session: &CrawlSession,
        url: &str,
        policy: &ContentPolicy,
        depth: usize,
        expand: bool,
    ) -> Result<(PageRecord, Vec<String>), RenderError> {
        ::log::debug!("SCRAPE: {}", url);
        page.goto(url, self.navigation_timeout).await?;
        let title = page.title().await?;
        let source = page.source().await?;
        let location = page.current_url().await?;
        if location != url {
            ::log::debug!("{} settled at {}", url, location);
        }

        let parsed = parsers::parse(&source, &location, policy, expand);
        let record = PageRecord::new(url.to_string(), title, &parsed.content, depth);
        let links = self.select_links(parsed.links, url, session.visited());

        Ok((record, links))
    }

    /// Keeps the first `link_budget` links internal to `page_url` and not yet visited
    fn select_links(
        &self,
        links: Vec<String>,
        page_url: &str,
        visited: &HashSet<String>,
    ) -> Vec<String> {
        let found = links.len();
        let selected = links
            .into_iter()
            .filter(|link| {
                let internal = filter::is_internal(link, page_url, visited);
                if !internal {
                    ::log::trace!("URL filter rejected: {}", link);
                }
                internal
            })
            .take(self.link_budget)
            .collect::<Vec<_>>();

        ::log::debug!(
            "Selected {} of {} links found on {}",
            selected.len(),
            found,
            page_url
        );
        selected
    }

    /// Shut down the renderer. Safe to call more than once.
    pub async fn close(&mut self) -> Result<(), RenderError> {
        self.renderer.shutdown().await
    }
}
