//! Infrastructure layer - HTTP, configuration, logging and file output
//!
//! Everything that touches the outside world lives here: the rate-limited
//! HTTP client, the search API client with its paginated product stream,
//! the per-record JSON exporter, configuration loading and logging setup.

pub mod config;
pub mod http_client;
pub mod json_export;
pub mod logging;
pub mod search_api;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager};
pub use http_client::{HttpClient, HttpClientConfig};
pub use json_export::JsonExporter;
pub use search_api::{SearchApiError, SearchClient, SearchPageFetcher, SearchRequest, fetch_products};
