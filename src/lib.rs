pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_providers, HtmlProvider};
pub use config::ScoutConfig;
pub use crate::core::aggregator::Aggregator;
pub use crate::core::matcher::MatchPolicy;
pub use domain::model::{AggregationResult, CanonicalPrice, Listing, Offer, ProviderOutcome, Query};
pub use domain::ports::Provider;
pub use utils::error::{Result, ScoutError};
