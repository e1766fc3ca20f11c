use crate::config::CrawlConfig;
use crate::crawlers::renderer::{PageRenderer, RenderedPage};
use crate::error::RenderError;
use async_trait::async_trait;
use fantoccini::wd::{Capabilities, TimeoutConfiguration, WindowHandle};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;

/// Local endpoints tried when the configured WebDriver URL refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Extra time the client waits past the page-load timeout before giving up
/// on the driver
const NAVIGATION_GRACE: Duration = Duration::from_secs(5);

/// Renders pages in a browser driven over WebDriver
pub struct WebDriverRenderer {
    client: Option<Client>,
    home: WindowHandle,
}

impl WebDriverRenderer {
    /// Starts a browser session.
    ///
    /// Tries `config.webdriver_url` first and then the common local
    /// defaults. Fails with `RenderError::Connect` when none accepts.
    ///
    /// The session's page-load timeout is set to the configured navigation
    /// timeout, so the driver itself abandons a slow page and the session
    /// stays usable for the next one.
    pub async fn connect(config: &CrawlConfig) -> Result<Self, RenderError> {
        let caps = capabilities(config.headless);
        let client = connect_to_webdriver(&config.webdriver_url, caps).await?;
        client
            .update_timeouts(page_load_timeouts(config.navigation_timeout()))
            .await?;
        let home = client.window().await?;
        Ok(Self {
            client: Some(client),
            home,
        })
    }
}

/// Session capabilities: wait for the load event, and run headless when asked
fn capabilities(headless: bool) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert("pageLoadStrategy".to_string(), json!("normal"));
    if headless {
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": [
                    "--headless=new",
                    "--no-sandbox",
                    "--disable-dev-shm-usage",
                    "--disable-gpu",
                    "--no-first-run",
                    "--no-default-browser-check",
                ]
            }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    caps
}

/// Session timeouts bounding navigation only
fn page_load_timeouts(timeout: Duration) -> TimeoutConfiguration {
    TimeoutConfiguration::new(None, Some(timeout), None)
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(
    webdriver_url: &str,
    caps: Capabilities,
) -> Result<Client, RenderError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps);

    let primary_error = match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e.to_string()
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue; // Skip if it's the same as the one we already tried
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        // Don't log fallback errors to avoid log spam
        if let Ok(client) = builder.connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(RenderError::Connect(format!(
        "{} ({})",
        webdriver_url, primary_error
    )))
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    type Page = WebDriverPage;

    async fn open_page(&mut self) -> Result<WebDriverPage, RenderError> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| RenderError::Connect("session already closed".to_string()))?;

        let window = client.new_window(true).await?;
        client.switch_to_window(window.handle.clone()).await?;
        ::log::trace!("Opened tab {:?}", window.handle);

        Ok(WebDriverPage {
            client,
            handle: window.handle,
            home: self.home.clone(),
        })
    }

    async fn shutdown(&mut self) -> Result<(), RenderError> {
        if let Some(client) = self.client.take() {
            client.close().await?;
            ::log::debug!("WebDriver session closed");
        }
        Ok(())
    }
}

/// One browser tab
pub struct WebDriverPage {
    client: Client,
    handle: WindowHandle,
    home: WindowHandle,
}

#[async_trait]
impl RenderedPage for WebDriverPage {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        // The driver enforces `timeout`; the client deadline only covers a
        // driver that stops answering
        match tokio::time::timeout(timeout + NAVIGATION_GRACE, self.client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) if e.is_timeout() => Err(RenderError::Timeout {
                url: url.to_string(),
                after: timeout,
            }),
            Ok(Err(e)) => Err(RenderError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
                after: timeout,
            }),
        }
    }

    async fn current_url(&mut self) -> Result<String, RenderError> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn title(&mut self) -> Result<String, RenderError> {
        Ok(self.client.title().await?)
    }

    async fn source(&mut self) -> Result<String, RenderError> {
        Ok(self.client.source().await?)
    }

    async fn close(self) -> Result<(), RenderError> {
        self.client.switch_to_window(self.handle).await?;
        self.client.close_window().await?;
        // Leave the session on a live window for the next tab
        self.client.switch_to_window(self.home).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_load_timeouts_only_bound_navigation() {
        let timeouts = page_load_timeouts(Duration::from_secs(30));
        assert_eq!(timeouts.page_load(), Some(Duration::from_secs(30)));
        assert_eq!(timeouts.script(), None);
        assert_eq!(timeouts.implicit(), None);
    }

    #[test]
    fn test_headless_capabilities() {
        let caps = capabilities(true);
        assert_eq!(caps["pageLoadStrategy"], "normal");
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));

        let caps = capabilities(false);
        assert!(!caps.contains_key("goog:chromeOptions"));
    }
}
