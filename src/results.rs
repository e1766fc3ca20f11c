use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL the page was scheduled under
    pub url: String,

    /// Document title (may be empty)
    pub title: String,

    /// Extracted text content, trimmed
    pub content: String,

    /// Capture time
    pub timestamp: DateTime<Utc>,

    /// Distance from the seed page (seed = 0)
    pub depth: usize,
}

impl PageRecord {
    /// Create a record stamped with the current time. Content is trimmed.
    pub fn new(url: String, title: String, content: &str, depth: usize) -> Self {
        Self {
            url,
            title,
            content: content.trim().to_string(),
            timestamp: Utc::now(),
            depth,
        }
    }
}

/// Result of visiting a single page
#[derive(Debug)]
pub enum PageOutcome {
    /// The page rendered; `links` are the followable links already filtered and budgeted
    Captured {
        record: PageRecord,
        links: Vec<String>,
    },
    /// The page could not be rendered or extracted
    Failed { url: String, reason: String },
}
