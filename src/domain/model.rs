use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized price used for every comparison.
///
/// `Unknown` orders after every `Known` value, so an unparseable price is only
/// ever picked as cheapest when nothing else is available. Serialized as a
/// plain number, or `null` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum CanonicalPrice {
    Known(u64),
    Unknown,
}

impl CanonicalPrice {
    pub fn amount(&self) -> Option<u64> {
        match self {
            CanonicalPrice::Known(amount) => Some(*amount),
            CanonicalPrice::Unknown => None,
        }
    }
}

impl From<Option<u64>> for CanonicalPrice {
    fn from(value: Option<u64>) -> Self {
        value.map_or(CanonicalPrice::Unknown, CanonicalPrice::Known)
    }
}

impl From<CanonicalPrice> for Option<u64> {
    fn from(price: CanonicalPrice) -> Self {
        price.amount()
    }
}

impl fmt::Display for CanonicalPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalPrice::Known(amount) => write!(f, "{}", amount),
            CanonicalPrice::Unknown => f.write_str("unknown"),
        }
    }
}

/// A phone model string as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ScoutError::ValidationError {
                message: "Phone model required".to_string(),
            });
        }
        Ok(Self(model))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The candidate a provider matched, still carrying its raw price texts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub price: Option<String>,
    pub sale_price: Option<String>,
    pub link: String,
    pub image: Option<String>,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Offer {
    /// Sale price wins over the list price when it carries any text.
    pub fn effective_price(&self) -> Option<&str> {
        self.sale_price
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.price.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub source_id: String,
    pub title: String,
    pub canonical_price: CanonicalPrice,
    pub raw_price: Option<String>,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty", default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// What a single provider reports for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Found(Offer),
    NotFound,
    Failed(String),
}

impl ProviderOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderOutcome::Found(_) => "found",
            ProviderOutcome::NotFound => "not_found",
            ProviderOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub source: String,
    pub title: String,
    pub price: CanonicalPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub listings: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<Listing>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub comparison: Vec<ComparisonRow>,
}

impl AggregationResult {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            found: false,
            message: Some(message.into()),
            listings: Vec::new(),
            recommended: None,
            comparison: Vec::new(),
        }
    }
}
