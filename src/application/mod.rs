//! Application layer - crawl use cases
//!
//! Coordinates the domain catalog and the infrastructure clients into the
//! actual crawl: brand page discovery and the product harvest loop.

pub mod brand_discovery;
pub mod crawler;

// Re-export commonly used items
pub use brand_discovery::{BrandDiscoveryService, BrandPage, extract_brand_links, parse_brand_page_url};
pub use crawler::{CrawlSummary, ProductCrawler};
