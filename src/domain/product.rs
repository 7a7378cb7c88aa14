//! Normalized product record and the raw-payload extraction routine.
//!
//! [`load_product`] is a pure transform from one raw API product object to a
//! flat [`ProductRecord`]. It has no partial-record tolerance: any required
//! path that is missing or non-coercible fails the whole record.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while extracting a [`ProductRecord`] from a raw payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("required field '{path}' missing from product payload")]
    MissingField { path: String },

    #[error("field '{path}' is not a string")]
    NotAString { path: String },

    #[error("field '{path}' is not a boolean")]
    NotABool { path: String },

    #[error("field '{path}' has non-numeric value '{value}'")]
    InvalidNumber { path: String, value: String },
}

impl ExtractError {
    fn missing(path: &str) -> Self {
        Self::MissingField {
            path: path.to_string(),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Flat, normalized product as written to the per-record output files.
///
/// `availability` and `price` are omitted from serialized output when absent
/// (discontinued or unpriced items); every other field is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub url: String,
    pub brand: String,
    pub model_number: String,
    pub product_type: String,
    pub product_label: String,
    pub item_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    pub average_rating: f64,
    pub reviews_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub features: BTreeMap<String, String>,
}

/// Extract a normalized [`ProductRecord`] from one raw search-API product
/// object. Pure transform, no I/O.
pub fn load_product(raw: &Value) -> ExtractResult<ProductRecord> {
    let availability_type = field(raw, "availabilityType")?;
    let discontinued = bool_at(availability_type, "discontinued", "availabilityType.discontinued")?;
    // A discontinued item has no availability; its `type` is not required.
    let availability = if discontinued {
        None
    } else {
        Some(string_at(availability_type, "type", "availabilityType.type")?)
    };

    // `pricing` must exist but may be null (or empty) for unpriced items.
    let pricing = field(raw, "pricing")?;
    let price = if pricing_is_absent(pricing) {
        None
    } else {
        Some(f64_at(pricing, "value", "pricing.value")?)
    };

    let identifiers = field(raw, "identifiers")?;
    let ratings = field(raw, "reviews").and_then(|r| {
        r.get("ratingsReviews")
            .ok_or_else(|| ExtractError::missing("reviews.ratingsReviews"))
    })?;

    Ok(ProductRecord {
        url: string_at(identifiers, "canonicalUrl", "identifiers.canonicalUrl")?,
        brand: string_at(identifiers, "brandName", "identifiers.brandName")?,
        model_number: string_at(identifiers, "modelNumber", "identifiers.modelNumber")?,
        product_type: string_at(identifiers, "productType", "identifiers.productType")?,
        product_label: string_at(identifiers, "productLabel", "identifiers.productLabel")?,
        item_id: i64_at(raw, "itemId", "itemId")?,
        availability,
        average_rating: f64_at(ratings, "averageRating", "reviews.ratingsReviews.averageRating")?,
        reviews_count: i64_at(ratings, "totalReviews", "reviews.ratingsReviews.totalReviews")?,
        price,
        features: extract_features(raw)?,
    })
}

/// Normalize a feature display name into a map key: lowercase, whitespace
/// runs collapsed to single underscores ("Energy Star Certified" ->
/// "energy_star_certified").
pub fn normalize_feature_key(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Flatten the first feature group's `{name, value}` pairs into a map with
/// normalized keys.
fn extract_features(raw: &Value) -> ExtractResult<BTreeMap<String, String>> {
    let groups = field(raw, "keyProductFeatures").and_then(|k| {
        k.get("keyProductFeaturesItems")
            .and_then(Value::as_array)
            .ok_or_else(|| ExtractError::missing("keyProductFeatures.keyProductFeaturesItems"))
    })?;
    let first = groups
        .first()
        .ok_or_else(|| ExtractError::missing("keyProductFeatures.keyProductFeaturesItems[0]"))?;
    let features = first
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ExtractError::missing("keyProductFeatures.keyProductFeaturesItems[0].features")
        })?;

    let mut map = BTreeMap::new();
    for feature in features {
        let name = feature
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ExtractError::missing("features[].name"))?;
        let value = feature
            .get("value")
            .ok_or_else(|| ExtractError::missing("features[].value"))?;
        let value = match value {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        map.insert(normalize_feature_key(name), value);
    }
    Ok(map)
}

fn field<'a>(raw: &'a Value, path: &str) -> ExtractResult<&'a Value> {
    raw.get(path).ok_or_else(|| ExtractError::missing(path))
}

fn string_at(obj: &Value, key: &str, path: &str) -> ExtractResult<String> {
    let value = obj.get(key).ok_or_else(|| ExtractError::missing(path))?;
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ExtractError::NotAString {
            path: path.to_string(),
        })
}

fn bool_at(obj: &Value, key: &str, path: &str) -> ExtractResult<bool> {
    let value = obj.get(key).ok_or_else(|| ExtractError::missing(path))?;
    value.as_bool().ok_or_else(|| ExtractError::NotABool {
        path: path.to_string(),
    })
}

/// Coerce a JSON number or numeric string to i64. The API returns `itemId`
/// and `totalReviews` as strings in practice.
fn i64_at(obj: &Value, key: &str, path: &str) -> ExtractResult<i64> {
    let value = obj.get(key).ok_or_else(|| ExtractError::missing(path))?;
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| invalid_number(path, value)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid_number(path, value)),
        _ => Err(invalid_number(path, value)),
    }
}

/// Coerce a JSON number or numeric string to f64.
fn f64_at(obj: &Value, key: &str, path: &str) -> ExtractResult<f64> {
    let value = obj.get(key).ok_or_else(|| ExtractError::missing(path))?;
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid_number(path, value)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid_number(path, value)),
        _ => Err(invalid_number(path, value)),
    }
}

fn invalid_number(path: &str, value: &Value) -> ExtractError {
    ExtractError::InvalidNumber {
        path: path.to_string(),
        value: value.to_string(),
    }
}

/// A null or empty-object pricing block both mean "no pricing".
fn pricing_is_absent(pricing: &Value) -> bool {
    pricing.is_null() || pricing.as_object().is_some_and(serde_json::Map::is_empty)
}
