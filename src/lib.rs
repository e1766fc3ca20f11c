pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use crawlers::{CrawlSession, Crawler, PageRenderer, RenderedPage, WebDriverRenderer};
pub use error::{CrawlError, RenderError};
pub use results::PageRecord;

use parsers::ContentPolicy;
use std::path::Path;

/// Main builder for a same-site crawl
pub struct SiteCrawl {
    config: CrawlConfig,
}

impl SiteCrawl {
    /// Create a crawl of `seed` with default settings, taking the WebDriver
    /// URL from `WEBDRIVER_URL` when it is set
    pub fn new(seed: &str) -> Self {
        let mut config = CrawlConfig::new(seed);
        config.apply_env();
        Self { config }
    }

    /// Create a crawl from a complete configuration, used as given
    pub fn from_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Set the number of depth levels to capture (1 = seed page only)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Extract content from these selectors instead of the visible body text
    pub fn with_selectors(mut self, selectors: Vec<String>) -> Self {
        self.config.selectors = Some(selectors);
        self
    }

    /// Set the maximum number of links followed from one page
    pub fn with_link_budget(mut self, link_budget: usize) -> Self {
        self.config.link_budget = link_budget;
        self
    }

    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Replace the configuration, keeping the current seed if `config` names none
    pub fn with_config(mut self, mut config: CrawlConfig) -> Self {
        if config.start_url.is_empty() {
            config.start_url = std::mem::take(&mut self.config.start_url);
        }
        self.config = config;
        self
    }

    /// Load configuration from a file; `WEBDRIVER_URL` still takes precedence
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let mut config = CrawlConfig::from_file(path)?;
        config.apply_env();
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, CrawlError> {
        let mut config = CrawlConfig::from_json(config_str)?;
        config.apply_env();
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Connect to WebDriver and run the crawl.
    ///
    /// Fails with `CrawlError::Init` when no browser session can be started.
    /// The browser is shut down before returning.
    pub async fn run(self) -> Result<Vec<PageRecord>, CrawlError> {
        self.config.validate()?;
        // Surface selector typos before a browser is started
        ContentPolicy::new(self.config.selectors.as_deref(), self.config.content_limit)?;

        let renderer = WebDriverRenderer::connect(&self.config)
            .await
            .map_err(CrawlError::Init)?;
        self.run_with(renderer).await
    }

    /// Run the crawl on an already started renderer, shutting it down afterwards
    pub async fn run_with<R: PageRenderer>(
        self,
        renderer: R,
    ) -> Result<Vec<PageRecord>, CrawlError> {
        let mut crawler = Crawler::from_config(renderer, &self.config);
        let result = match self.config.validate() {
            Ok(()) => {
                crawler
                    .crawl(
                        &self.config.start_url,
                        self.config.selectors.as_deref(),
                        self.config.max_depth,
                    )
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = crawler.close().await {
            ::log::warn!("Failed to shut down renderer: {}", e);
        }
        result
    }
}
