use crate::error::RenderError;
use async_trait::async_trait;
use std::time::Duration;

/// A browser session able to open pages.
///
/// One renderer is shared by a whole crawl and is used by one page at a time.
#[async_trait]
pub trait PageRenderer: Send {
    type Page: RenderedPage;

    /// Open a fresh page (tab) in the session
    async fn open_page(&mut self) -> Result<Self::Page, RenderError>;

    /// End the session. Calling it again, or on a session that never
    /// opened a page, does nothing.
    async fn shutdown(&mut self) -> Result<(), RenderError>;
}

/// A single open page
#[async_trait]
pub trait RenderedPage: Send {
    /// Navigate and wait for the document to settle, failing with
    /// `RenderError::Timeout` once `timeout` has elapsed.
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError>;

    /// URL of the loaded document, after any redirect
    async fn current_url(&mut self) -> Result<String, RenderError>;

    /// Title of the loaded document
    async fn title(&mut self) -> Result<String, RenderError>;

    /// Serialized DOM of the loaded document, after scripts have run
    async fn source(&mut self) -> Result<String, RenderError>;

    /// Release the page
    async fn close(self) -> Result<(), RenderError>;
}
