//! depot-crawler - product data harvester for appliance and furniture
//! categories
//!
//! Discovers brand listing pages per sub-department, pages through the
//! site's internal search API per store, normalizes each raw product into a
//! flat record and writes it to its own JSON file.
//!
//! Layering follows Clean Architecture:
//! - `domain`: the static catalog, extraction rules and record types
//! - `application`: discovery and crawl orchestration
//! - `infrastructure`: HTTP, search API client, config, logging, file export

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CrawlSummary, ProductCrawler};
pub use domain::{ExtractError, ProductRecord, load_product};
pub use infrastructure::{AppConfig, ConfigManager};
