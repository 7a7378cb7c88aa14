//! Brand page discovery
//!
//! The crawl starts from the department listing pages in the catalog and
//! follows only the links that point at configured brand pages. Each
//! discovered URL is split positionally into the sub-department, brand and
//! navigation token the search API needs.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::domain::SubDepartment;
use crate::infrastructure::HttpClient;

/// One crawlable brand page with the tokens derived from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandPage {
    pub url: String,
    /// e.g. `Dishwashers`, from the third-from-last path segment.
    pub sub_department: String,
    /// e.g. `Samsung`, from the second-from-last path segment.
    pub brand: String,
    /// Navigation token after the last `N-`, passed to the search API.
    pub nav_param: String,
}

/// Split a brand page URL into its crawl tokens.
///
/// The tokens sit at fixed positions: the sub-department is the last
/// `-`-separated word of the third-from-last path segment, the brand the
/// last word of the second-from-last segment, and the nav param everything
/// after the final `N-`.
pub fn parse_brand_page_url(url: &str) -> Result<BrandPage> {
    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 3 {
        bail!("brand page URL has too few path segments: {url}");
    }
    let Some((_, nav_param)) = url.rsplit_once("N-") else {
        bail!("brand page URL carries no N- navigation token: {url}");
    };

    let last_word = |segment: &str| {
        segment
            .rsplit('-')
            .next()
            .unwrap_or(segment)
            .to_string()
    };

    Ok(BrandPage {
        url: url.to_string(),
        sub_department: last_word(segments[segments.len() - 3]),
        brand: last_word(segments[segments.len() - 2]),
        nav_param: nav_param.to_string(),
    })
}

/// Extract brand page URLs from a department listing page.
///
/// Keeps anchors whose absolutized href contains `{base_url}/{brand}/` for
/// any configured brand of the department, deduplicated in document order.
pub fn extract_brand_links(html: &str, dept: &SubDepartment, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor = Selector::parse("a[href]").expect("static selector");

    let patterns: Vec<String> = dept
        .brands
        .iter()
        .map(|brand| format!("{}/{}/", dept.base_url, brand))
        .collect();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&anchor) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{base_url}{href}")
        } else {
            continue;
        };
        if patterns.iter().any(|p| absolute.contains(p.as_str())) && seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }
    links
}

/// Fetches department listing pages and resolves their brand links.
pub struct BrandDiscoveryService {
    http: Arc<HttpClient>,
    base_url: String,
}

impl BrandDiscoveryService {
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    /// Discover the brand pages of one sub-department.
    ///
    /// Links that match a brand pattern but cannot be split into crawl
    /// tokens are logged and skipped; they never fail the run.
    pub async fn discover(&self, dept: &SubDepartment) -> Result<Vec<BrandPage>> {
        let start_url = dept.start_url();
        info!(department = %dept.base_url, url = %start_url, "discovering brand pages");

        let html = self.http.get_text(&start_url).await?;
        let links = extract_brand_links(&html, dept, &self.base_url);

        let mut pages = Vec::with_capacity(links.len());
        for link in links {
            match parse_brand_page_url(&link) {
                Ok(page) => pages.push(page),
                Err(e) => warn!(url = %link, error = %e, "skipping unparsable brand link"),
            }
        }

        info!(
            department = %dept.base_url,
            brand_pages = pages.len(),
            "brand discovery complete"
        );
        Ok(pages)
    }
}
