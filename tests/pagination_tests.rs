//! Pagination tests for the product stream, driven by a stub page fetcher.

use std::sync::Mutex;

use async_trait::async_trait;
use depot_crawler::infrastructure::search_api::{
    SearchApiError, SearchPageFetcher, SearchRequest, fetch_products,
};
use futures::{TryStreamExt, pin_mut};
use serde_json::{Value, json};

/// Serves canned pages in order and records the requested offsets.
struct StubFetcher {
    pages: Vec<Vec<Value>>,
    offsets: Mutex<Vec<u32>>,
}

impl StubFetcher {
    fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            offsets: Mutex::new(Vec::new()),
        }
    }

    fn recorded_offsets(&self) -> Vec<u32> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchPageFetcher for StubFetcher {
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        start_index: u32,
    ) -> Result<Vec<Value>, SearchApiError> {
        let mut offsets = self.offsets.lock().unwrap();
        offsets.push(start_index);
        let page_number = (start_index / request.page_size) as usize;
        Ok(self.pages.get(page_number).cloned().unwrap_or_default())
    }
}

fn item(id: u32) -> Value {
    json!({"itemId": id.to_string()})
}

async fn collect(fetcher: &StubFetcher, request: SearchRequest) -> Vec<Value> {
    let stream = fetch_products(fetcher, request);
    pin_mut!(stream);
    stream.try_collect().await.unwrap()
}

#[tokio::test]
async fn test_stops_after_first_short_page() {
    let fetcher = StubFetcher::new(vec![
        vec![item(1), item(2)],
        vec![item(3), item(4)],
        vec![item(5)],
    ]);
    let request = SearchRequest::new("5yc1vZc3po", "1950", "Dishwashers", 2);

    let products = collect(&fetcher, request).await;

    assert_eq!(products.len(), 5);
    assert_eq!(fetcher.recorded_offsets(), vec![0, 2, 4]);
}

#[tokio::test]
async fn test_yields_items_in_api_order() {
    let fetcher = StubFetcher::new(vec![vec![item(10), item(11)], vec![item(12)]]);
    let request = SearchRequest::new("n", "1950", "Refrigerators", 2);

    let products = collect(&fetcher, request).await;

    let ids: Vec<&str> = products
        .iter()
        .map(|p| p["itemId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["10", "11", "12"]);
}

#[tokio::test]
async fn test_empty_first_page_yields_nothing_after_one_request() {
    let fetcher = StubFetcher::new(vec![]);
    let request = SearchRequest::new("n", "1950", "Mattresses", 48);

    let products = collect(&fetcher, request).await;

    assert!(products.is_empty());
    assert_eq!(fetcher.recorded_offsets(), vec![0]);
}

#[tokio::test]
async fn test_exact_page_boundary_requests_one_extra_page() {
    // Two full pages then an empty one: the stream cannot know page two was
    // the last until the empty page comes back.
    let fetcher = StubFetcher::new(vec![
        vec![item(1), item(2)],
        vec![item(3), item(4)],
        vec![],
    ]);
    let request = SearchRequest::new("n", "6177", "Dishwashers", 2);

    let products = collect(&fetcher, request).await;

    assert_eq!(products.len(), 4);
    assert_eq!(fetcher.recorded_offsets(), vec![0, 2, 4]);
}

/// Fails on the second page to show mid-stream errors abort the fetch.
struct FailingFetcher;

#[async_trait]
impl SearchPageFetcher for FailingFetcher {
    async fn fetch_page(
        &self,
        request: &SearchRequest,
        start_index: u32,
    ) -> Result<Vec<Value>, SearchApiError> {
        if start_index == 0 {
            Ok((0..request.page_size).map(item).collect())
        } else {
            Err(SearchApiError::Request {
                url: "https://example.com".to_string(),
                message: "connection reset".to_string(),
            })
        }
    }
}

#[tokio::test]
async fn test_mid_stream_error_aborts_without_retry() {
    let request = SearchRequest::new("n", "1013", "Dishwashers", 3);
    let stream = fetch_products(&FailingFetcher, request);
    pin_mut!(stream);

    let mut yielded = 0;
    let error = loop {
        match stream.try_next().await {
            Ok(Some(_)) => yielded += 1,
            Ok(None) => panic!("stream ended without surfacing the error"),
            Err(e) => break e,
        }
    };

    assert_eq!(yielded, 3);
    assert!(matches!(error, SearchApiError::Request { .. }));
}
