pub mod aggregator;
pub mod matcher;
pub mod normalizer;
pub mod recommender;

pub use crate::domain::model::{
    AggregationResult, CanonicalPrice, ComparisonRow, Listing, Offer, ProviderOutcome, Query,
};
pub use crate::domain::ports::Provider;
pub use crate::utils::error::Result;
