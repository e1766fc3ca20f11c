use clap::Parser;
use site_trawl::SiteCrawl;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!("Starting crawler for URI: {}", config.start_url);
    ::log::info!(
        "Web crawling requires a WebDriver server (e.g., ChromeDriver); set WEBDRIVER_URL if not using {}",
        config.webdriver_url
    );

    let records = match SiteCrawl::from_config(config).run().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            std::process::exit(1);
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            ::log::error!("Failed to serialize results: {}", e);
            std::process::exit(1);
        }
    }
}
