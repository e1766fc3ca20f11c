use crate::error::CrawlError;
use crate::parsers::DEFAULT_CONTENT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the configured WebDriver URL
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

/// Configuration for a same-site crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from
    #[serde(default)]
    pub start_url: String,

    /// CSS selectors whose text forms the page content; heuristic extraction when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<String>>,

    /// Number of depth levels to capture (1 = seed page only)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of internal links followed from one page
    #[serde(default = "default_link_budget")]
    pub link_budget: usize,

    /// Per-page navigation timeout in seconds
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Characters kept by heuristic extraction
    #[serde(default = "default_content_limit")]
    pub content_limit: usize,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

/// Default value for max_depth
fn default_max_depth() -> usize {
    1
}

/// Default value for link_budget
fn default_link_budget() -> usize {
    10
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_content_limit() -> usize {
    DEFAULT_CONTENT_LIMIT
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            selectors: None,
            max_depth: default_max_depth(),
            link_budget: default_link_budget(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            content_limit: default_content_limit(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrawlError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CrawlError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the WebDriver URL with `WEBDRIVER_URL` when it is set and non-empty
    pub fn apply_env(&mut self) {
        self.override_webdriver_url(std::env::var(WEBDRIVER_URL_ENV).ok());
    }

    /// Replace the WebDriver URL with `webdriver_url` unless it is missing or empty
    pub fn override_webdriver_url(&mut self, webdriver_url: Option<String>) {
        if let Some(webdriver_url) = webdriver_url.filter(|url| !url.is_empty()) {
            self.webdriver_url = webdriver_url;
        }
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Checks the values that cannot be expressed by the types alone
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.start_url.is_empty() {
            return Err(CrawlError::MissingSeed);
        }
        if self.max_depth == 0 {
            return Err(CrawlError::InvalidDepth(self.max_depth));
        }
        Ok(())
    }
}
