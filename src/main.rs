//! Crawler entry point
//!
//! Usage: `depot-crawler [config.json]`. Without an argument the built-in
//! defaults are used.

use std::path::PathBuf;

use anyhow::Result;
use tracing::error;

use depot_crawler::infrastructure::logging::init_logging;
use depot_crawler::{ConfigManager, ProductCrawler};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = ConfigManager::new(config_path).load_config().await?;
    init_logging(&config.user.logging)?;

    let crawler = ProductCrawler::new(config)?;
    match crawler.run().await {
        Ok(summary) => {
            println!(
                "Crawl {} finished: {} records from {} brand pages ({} store fetches) in {}s",
                summary.session_id,
                summary.records_written,
                summary.brand_pages,
                summary.store_fetches,
                summary.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "crawl failed");
            Err(e)
        }
    }
}
