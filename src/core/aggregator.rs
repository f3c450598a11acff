use crate::core::normalizer::normalize_price;
use crate::core::recommender::{compare, recommend};
use crate::core::{AggregationResult, Listing, Offer, Provider, ProviderOutcome, Query};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::validate_unique;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

pub const NO_MATCH_MESSAGE: &str = "No matching product on any site.";

/// Fans a query out to every provider and reconciles what comes back.
pub struct Aggregator {
    providers: Vec<Arc<dyn Provider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    fn check_providers(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(ScoutError::AggregationError {
                message: "no providers configured".to_string(),
            });
        }
        validate_unique("providers.id", self.provider_ids()).map_err(|e| {
            ScoutError::AggregationError {
                message: e.to_string(),
            }
        })
    }

    /// Queries all providers at once and waits for every one of them.
    ///
    /// Not-found and failed providers only show up in the logs. The returned
    /// listings follow provider order, regardless of which one answered first.
    pub async fn aggregate(&self, query: &Query) -> Result<AggregationResult> {
        self.check_providers()?;

        let started = Instant::now();
        tracing::info!(
            "Searching {} providers for \"{}\"",
            self.providers.len(),
            query
        );

        let tasks = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let query = query.clone();
            tokio::spawn(async move { provider.search(&query).await })
        });
        let settled = join_all(tasks).await;

        let mut listings = Vec::new();
        for (provider, joined) in self.providers.iter().zip(settled) {
            let outcome = joined.unwrap_or_else(|e| {
                ProviderOutcome::Failed(format!("provider task did not complete: {}", e))
            });
            tracing::debug!(
                provider = provider.id(),
                outcome = outcome.label(),
                "Provider settled"
            );

            match outcome {
                ProviderOutcome::Found(offer) => {
                    let listing = into_listing(provider.id(), offer);
                    tracing::debug!(
                        provider = provider.id(),
                        price = %listing.canonical_price,
                        "Matched \"{}\"",
                        listing.title
                    );
                    listings.push(listing);
                }
                ProviderOutcome::NotFound => {
                    tracing::info!(provider = provider.id(), "No match for \"{}\"", query);
                }
                ProviderOutcome::Failed(reason) => {
                    tracing::warn!(provider = provider.id(), error = %reason, "Provider failed");
                }
            }
        }

        tracing::info!(
            "Collected {} listings from {} providers in {:?}",
            listings.len(),
            self.providers.len(),
            started.elapsed()
        );

        if listings.is_empty() {
            return Ok(AggregationResult::not_found(NO_MATCH_MESSAGE));
        }

        let recommended = recommend(&listings).cloned();
        let comparison = compare(&listings);

        Ok(AggregationResult {
            found: true,
            message: None,
            listings,
            recommended,
            comparison,
        })
    }
}

/// Stamps an offer with its source and a canonical price.
pub fn into_listing(source_id: &str, offer: Offer) -> Listing {
    let canonical_price = normalize_price(offer.effective_price());
    let raw_price = offer.effective_price().map(str::to_string);

    Listing {
        source_id: source_id.to_string(),
        title: offer.title,
        canonical_price,
        raw_price,
        link: offer.link,
        image: offer.image,
        extra: offer.extra,
    }
}
