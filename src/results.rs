use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Column order of every exported file
pub const CSV_SCHEMA: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// One product listed on a category page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Number of star icons shown on the card
    pub rating: u32,
    pub num_of_reviews: u32,
}

/// Untyped field-name to text mapping read from one product card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<&'static str, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn require(&self, key: &'static str) -> Result<&str> {
        self.get(key).ok_or(ScrapeError::MissingKey(key))
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<T> {
        let value = self.require(key)?;
        value.trim().parse().map_err(|_| ScrapeError::InvalidField {
            field: key,
            value: value.to_string(),
        })
    }
}

impl TryFrom<RawRecord> for Product {
    type Error = ScrapeError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Ok(Self {
            title: raw.require("title")?.to_string(),
            description: raw.require("description")?.to_string(),
            price: raw.parse("price")?,
            rating: raw.parse("rating")?,
            num_of_reviews: raw.parse("num_of_reviews")?,
        })
    }
}

/// Converts raw card records into typed products, keeping page order.
///
/// The first record with a missing key or an unparsable value fails the whole batch.
pub fn build_products(records: Vec<RawRecord>) -> Result<Vec<Product>> {
    records.into_iter().map(Product::try_from).collect()
}
