//! File export tests: naming convention and serialized record shape.

use std::collections::BTreeMap;

use depot_crawler::ProductRecord;
use depot_crawler::infrastructure::JsonExporter;
use serde_json::Value;
use tempfile::TempDir;

fn sample_record() -> ProductRecord {
    let mut features = BTreeMap::new();
    features.insert("tub_material".to_string(), "Stainless Steel".to_string());

    ProductRecord {
        url: "/p/Samsung-24-in-Dishwasher/123".to_string(),
        brand: "Samsung".to_string(),
        model_number: "DW80R2031US".to_string(),
        product_type: "MAJOR_APPLIANCE".to_string(),
        product_label: "24 in. Front Control Dishwasher".to_string(),
        item_id: 123,
        availability: Some("InStock".to_string()),
        average_rating: 4.5,
        reviews_count: 10,
        price: Some(599.99),
        features,
    }
}

#[tokio::test]
async fn test_record_lands_in_its_own_file() {
    let dir = TempDir::new().unwrap();
    let exporter = JsonExporter::new(dir.path());
    exporter.ensure_result_dir().await.unwrap();

    let path = exporter
        .write_record("chicago", "Dishwashers", &sample_record())
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "chicago_Dishwashers_Samsung_123.json"
    );

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["item_id"], 123);
    assert_eq!(value["availability"], "InStock");
    assert_eq!(value["features"]["tub_material"], "Stainless Steel");
}

#[tokio::test]
async fn test_absent_fields_are_omitted_not_null() {
    let dir = TempDir::new().unwrap();
    let exporter = JsonExporter::new(dir.path());
    exporter.ensure_result_dir().await.unwrap();

    let mut record = sample_record();
    record.availability = None;
    record.price = None;

    let path = exporter
        .write_record("new_york", "Refrigerators", &record)
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("availability").is_none());
    assert!(value.get("price").is_none());
    assert_eq!(value["reviews_count"], 10);
}

#[tokio::test]
async fn test_ensure_result_dir_creates_nested_path() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("out").join("run1");
    let exporter = JsonExporter::new(&nested);

    exporter.ensure_result_dir().await.unwrap();
    assert!(nested.is_dir());
}
