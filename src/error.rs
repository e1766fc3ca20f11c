use std::time::Duration;
use thiserror::Error;

/// Errors raised by a page renderer
#[derive(Debug, Error)]
pub enum RenderError {
    /// No WebDriver server accepted a session
    #[error("failed to connect to WebDriver: {0}")]
    Connect(String),

    /// Navigation did not settle within the allowed time
    #[error("navigation to {url} timed out after {}s", .after.as_secs())]
    Timeout { url: String, after: Duration },

    /// The browser refused or failed the navigation
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Any other WebDriver command failure
    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),
}

/// Errors surfaced to the caller of a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The renderer could not be started
    #[error("renderer initialization failed: {0}")]
    Init(#[source] RenderError),

    /// A content selector did not parse
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Depth below the minimum of one
    #[error("max depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// Neither the CLI nor the config file named a seed URL
    #[error("no seed URL given")]
    MissingSeed,

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
