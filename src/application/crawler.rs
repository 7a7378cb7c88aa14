//! Crawl orchestration
//!
//! Walks the configured sub-departments, discovers their brand pages, and
//! harvests every (brand page, store) combination sequentially. One
//! in-flight request at a time; the first failure aborts the run.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::{TryStreamExt, pin_mut};
use tracing::info;
use uuid::Uuid;

use crate::application::brand_discovery::{BrandDiscoveryService, BrandPage};
use crate::domain::catalog::{STORES, SUB_DEPARTMENTS};
use crate::domain::{constants, load_product};
use crate::infrastructure::{
    AppConfig, HttpClient, HttpClientConfig, JsonExporter, SearchClient, SearchRequest,
    fetch_products,
};

/// Outcome of one complete crawl run.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub brand_pages: u32,
    pub store_fetches: u32,
    pub records_written: u64,
    pub elapsed_seconds: u64,
}

/// Drives the whole crawl: discovery, search pagination, extraction and
/// export.
pub struct ProductCrawler {
    discovery: BrandDiscoveryService,
    search: SearchClient,
    exporter: JsonExporter,
    config: AppConfig,
}

impl ProductCrawler {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http_config = HttpClientConfig {
            user_agent: constants::USER_AGENT.to_string(),
            timeout_seconds: config.advanced.request_timeout_seconds,
            max_requests_per_second: config.user.max_requests_per_second,
        };
        let http = Arc::new(HttpClient::new(&http_config)?);

        let discovery = BrandDiscoveryService::new(Arc::clone(&http), &config.advanced.base_url);
        let search = SearchClient::new(Arc::clone(&http), &config.advanced.base_url);
        let exporter = JsonExporter::new(&config.user.result_dir);

        Ok(Self {
            discovery,
            search,
            exporter,
            config,
        })
    }

    /// Run the full crawl across every sub-department, brand page and store.
    pub async fn run(&self) -> Result<CrawlSummary> {
        let session_id = Uuid::new_v4();
        let started_at = Utc::now();
        let started = Instant::now();
        info!(%session_id, "starting crawl session");

        self.exporter.ensure_result_dir().await?;

        let mut brand_pages = 0u32;
        let mut store_fetches = 0u32;
        let mut records_written = 0u64;

        for dept in SUB_DEPARTMENTS.iter() {
            let pages = self.discovery.discover(dept).await?;
            for page in pages {
                brand_pages += 1;
                for (store_loc, store_id) in STORES {
                    store_fetches += 1;
                    records_written += self
                        .harvest(&page, store_loc, store_id)
                        .await
                        .with_context(|| {
                            format!("harvest failed for {} at store {store_loc}", page.url)
                        })?;
                }
            }
        }

        let summary = CrawlSummary {
            session_id,
            started_at,
            brand_pages,
            store_fetches,
            records_written,
            elapsed_seconds: started.elapsed().as_secs(),
        };
        info!(
            %session_id,
            brand_pages = summary.brand_pages,
            store_fetches = summary.store_fetches,
            records_written = summary.records_written,
            elapsed_seconds = summary.elapsed_seconds,
            "crawl session complete"
        );
        Ok(summary)
    }

    /// Harvest every product of one brand page at one store.
    async fn harvest(&self, page: &BrandPage, store_loc: &str, store_id: &str) -> Result<u64> {
        info!(
            brand = %page.brand,
            sub_department = %page.sub_department,
            store = %store_loc,
            "harvesting brand page"
        );

        let request = SearchRequest::new(
            &page.nav_param,
            store_id,
            &page.sub_department,
            self.config.user.page_size,
        );
        let products = fetch_products(&self.search, request);
        pin_mut!(products);

        let mut written = 0u64;
        while let Some(raw) = products.try_next().await? {
            let record = load_product(&raw).with_context(|| {
                format!(
                    "product extraction failed for {} ({store_loc})",
                    page.brand
                )
            })?;
            self.exporter
                .write_record(store_loc, &page.sub_department, &record)
                .await?;
            written += 1;
        }

        info!(
            brand = %page.brand,
            store = %store_loc,
            records = written,
            "brand page harvested"
        );
        Ok(written)
    }
}
