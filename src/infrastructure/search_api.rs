//! Search API client: the paginated `searchModel` fetch.
//!
//! One fetch walks a single (nav_param, store) combination through the
//! search endpoint in strictly increasing offset order and yields raw
//! product objects as a lazy stream. The stream is finite and
//! non-restartable; it ends after the first page shorter than the page
//! size. There is no retry: transport and response-shape failures abort the
//! stream immediately.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use super::http_client::HttpClient;
use crate::domain::constants;

/// Errors raised by the search API client.
#[derive(Error, Debug)]
pub enum SearchApiError {
    #[error("search request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("unexpected search response shape: missing '{path}'")]
    UnexpectedShape { path: String },
}

/// Parameters of one paginated product fetch.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub nav_param: String,
    pub store_id: String,
    pub sub_department: String,
    pub page_size: u32,
}

impl SearchRequest {
    /// Build a request, clamping the page size to the API maximum.
    pub fn new(nav_param: &str, store_id: &str, sub_department: &str, page_size: u32) -> Self {
        Self {
            nav_param: nav_param.to_string(),
            store_id: store_id.to_string(),
            sub_department: sub_department.to_string(),
            page_size: page_size.clamp(1, constants::MAX_PAGE_SIZE),
        }
    }
}

/// Seam between the pagination loop and the wire. The production
/// implementation posts to the search endpoint; tests substitute canned
/// pages.
#[async_trait]
pub trait SearchPageFetcher: Send + Sync {
    /// Fetch one page of raw product objects at the given offset.
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        start_index: u32,
    ) -> Result<Vec<Value>, SearchApiError>;
}

/// Client for the `searchModel` endpoint.
pub struct SearchClient {
    http: Arc<HttpClient>,
    endpoint: String,
}

impl SearchClient {
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url, constants::SEARCH_ENDPOINT_PATH),
        }
    }

    /// JSON body of one search page request.
    pub fn request_body(request: &SearchRequest, start_index: u32) -> Value {
        json!({
            "operationName": constants::OPERATION_NAME,
            "query": constants::SEARCH_MODEL_QUERY,
            "variables": {
                "navParam": request.nav_param,
                "storeId": request.store_id,
                "pageSize": request.page_size,
                "startIndex": start_index,
            }
        })
    }

    /// Per-request headers: the experience name is switched on the
    /// sub-department (the user-agent is a client default).
    pub fn request_headers(request: &SearchRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(constants::EXPERIENCE_HEADER),
            HeaderValue::from_static(constants::experience_name(&request.sub_department)),
        );
        headers
    }

    /// Dig the product array out of a `searchModel` response.
    fn products_from_response(response: Value) -> Result<Vec<Value>, SearchApiError> {
        let missing = |path: &str| SearchApiError::UnexpectedShape {
            path: path.to_string(),
        };
        let products = response
            .get("data")
            .ok_or_else(|| missing("data"))?
            .get("searchModel")
            .ok_or_else(|| missing("data.searchModel"))?
            .get("products")
            .ok_or_else(|| missing("data.searchModel.products"))?;
        match products {
            Value::Array(items) => Ok(items.clone()),
            _ => Err(missing("data.searchModel.products[]")),
        }
    }
}

#[async_trait]
impl SearchPageFetcher for SearchClient {
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        start_index: u32,
    ) -> Result<Vec<Value>, SearchApiError> {
        let body = Self::request_body(request, start_index);
        let headers = Self::request_headers(request);

        let response = self
            .http
            .post_json(&self.endpoint, headers, &body)
            .await
            .map_err(|e| SearchApiError::Request {
                url: self.endpoint.clone(),
                message: format!("{e:#}"),
            })?;

        let products = Self::products_from_response(response)?;
        debug!(
            nav_param = %request.nav_param,
            store_id = %request.store_id,
            start_index,
            count = products.len(),
            "fetched search page"
        );
        Ok(products)
    }
}

/// Lazily page through the search results for one request.
///
/// Pages are requested one at a time at offsets 0, page_size, 2*page_size…
/// until a page comes back with fewer than `page_size` items; the items of
/// that final page are still yielded. Records appear in API order.
pub fn fetch_products<'a, F>(
    fetcher: &'a F,
    request: SearchRequest,
) -> impl Stream<Item = Result<Value, SearchApiError>> + 'a
where
    F: SearchPageFetcher + ?Sized,
{
    stream::try_unfold(
        (request, 0u32, false),
        move |(request, start_index, done)| async move {
            if done {
                return Ok(None);
            }
            let page = fetcher.fetch_page(&request, start_index).await?;
            let last_page = (page.len() as u32) < request.page_size;
            let next_index = start_index + request.page_size;
            let items = stream::iter(page.into_iter().map(Ok));
            Ok(Some((items, (request, next_index, last_page))))
        },
    )
    .try_flatten()
}
