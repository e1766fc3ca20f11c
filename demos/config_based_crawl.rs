use clap::Parser;
use site_trawl::{CrawlConfig, SiteCrawl};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to crawl configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override max depth
    #[arg(short, long)]
    depth: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();

    // Load configuration from file, WEBDRIVER_URL taking precedence
    let mut config = CrawlConfig::from_file(&args.config)?;
    config.apply_env();
    println!("Crawl configuration:");
    println!("  Start URL: {}", config.start_url);
    println!("  Max depth: {}", config.max_depth);
    println!("  Link budget: {}", config.link_budget);
    println!("  WebDriver URL: {}", config.webdriver_url);
    match &config.selectors {
        Some(selectors) => println!("  Selectors: {}", selectors.join(", ")),
        None => println!("  Selectors: none (visible body text)"),
    }

    let mut crawl = SiteCrawl::from_config(config);
    if let Some(depth) = args.depth {
        println!("Overriding max depth: {}", depth);
        crawl = crawl.with_max_depth(depth);
    }

    let records = crawl.run().await?;

    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>3}. [depth {}] {} - {:?} ({} chars)",
            i + 1,
            record.depth,
            record.url,
            record.title,
            record.content.chars().count()
        );
    }
    println!("Captured {} pages.", records.len());

    Ok(())
}
