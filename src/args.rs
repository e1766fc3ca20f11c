use clap::Parser;
use site_trawl::config::WEBDRIVER_URL_ENV;
use site_trawl::{CrawlConfig, CrawlError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-trawl")]
#[command(about = "Crawls a website within its own domain and prints the captured pages as JSON")]
#[command(version)]
pub struct Args {
    /// Seed URL to crawl (may come from --config instead)
    pub uri: Option<String>,

    /// Number of depth levels to capture (1 = seed page only)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// CSS selector whose text becomes the page content (repeatable)
    #[arg(short, long = "selector")]
    pub selectors: Vec<String>,

    /// Path to a JSON crawl configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL of the WebDriver server
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Builds the crawl configuration. Command-line values take precedence
    /// over `WEBDRIVER_URL`, which takes precedence over the file.
    pub fn to_config(&self) -> Result<CrawlConfig, CrawlError> {
        self.to_config_with_env(std::env::var(WEBDRIVER_URL_ENV).ok())
    }

    fn to_config_with_env(&self, env_webdriver_url: Option<String>) -> Result<CrawlConfig, CrawlError> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?,
            None => CrawlConfig::default(),
        };
        config.override_webdriver_url(env_webdriver_url);

        if let Some(uri) = &self.uri {
            config.start_url = uri.clone();
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if !self.selectors.is_empty() {
            config.selectors = Some(self.selectors.clone());
        }
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values() {
        let args = Args::try_parse_from([
            "site-trawl",
            "https://example.com",
            "--depth",
            "2",
            "-s",
            "h1",
            "--selector",
            "p",
        ])
        .unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.start_url, "https://example.com");
        assert_eq!(config.max_depth, 2);
        assert_eq!(
            config.selectors,
            Some(vec!["h1".to_string(), "p".to_string()])
        );
        assert!(!args.pretty);
    }

    #[test]
    fn test_defaults_to_depth_one() {
        let args = Args::try_parse_from(["site-trawl", "https://example.com"]).unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.max_depth, 1);
        assert!(config.selectors.is_none());
    }

    #[test]
    fn test_webdriver_flag_beats_environment() {
        let env = Some("http://env-grid:4444".to_string());

        let args = Args::try_parse_from([
            "site-trawl",
            "https://example.com",
            "--webdriver-url",
            "http://localhost:9515",
        ])
        .unwrap();
        let config = args.to_config_with_env(env.clone()).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");

        let args = Args::try_parse_from(["site-trawl", "https://example.com"]).unwrap();
        let config = args.to_config_with_env(env).unwrap();
        assert_eq!(config.webdriver_url, "http://env-grid:4444");
    }

    #[test]
    fn test_missing_seed() {
        let args = Args::try_parse_from(["site-trawl"]).unwrap();
        assert!(matches!(args.to_config(), Err(CrawlError::MissingSeed)));
    }

    #[test]
    fn test_zero_depth() {
        let args = Args::try_parse_from(["site-trawl", "https://example.com", "-d", "0"]).unwrap();
        assert!(matches!(args.to_config(), Err(CrawlError::InvalidDepth(0))));
    }
}
