//! Provider backed by a retail site's HTML search page.
//!
//! The search page is fetched, each product card is read with the configured
//! CSS selectors, and the first card accepted by the provider's match policy
//! wins. Sites that only show prices on the product page get a second request
//! for the matched card's link.

use crate::config::{DetailSelectors, ProviderConfig, QUERY_PLACEHOLDER};
use crate::core::{Offer, Provider, ProviderOutcome, Query};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// One product card from a search results page.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub link: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

pub struct HtmlProvider {
    config: ProviderConfig,
    client: Client,
    timeout: Duration,
}

impl HtmlProvider {
    pub fn new(config: ProviderConfig, client: Client, timeout: Duration) -> Self {
        Self {
            config,
            client,
            timeout,
        }
    }

    pub fn search_url(&self, query: &Query) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(query.as_str().as_bytes()).collect();
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.search_path.replace(QUERY_PLACEHOLDER, &encoded)
        )
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!(provider = %self.config.id, "GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Reads every product card from a search page.
    pub fn parse_cards(&self, html: &str) -> Result<Vec<Card>> {
        let selectors = &self.config.selectors;
        let card_sel = parse_selector(&selectors.card)?;
        let title_sel = parse_selector(&selectors.title)?;
        let link_sel = parse_selector(&selectors.link)?;
        let price_sel = selectors.price.as_deref().map(parse_selector).transpose()?;
        let image_sel = selectors.image.as_deref().map(parse_selector).transpose()?;

        let document = Html::parse_document(html);
        let cards = document
            .select(&card_sel)
            .map(|card| Card {
                title: first_text(card, &title_sel).unwrap_or_default(),
                link: first_attr(card, &link_sel, "href")
                    .map(|href| resolve_url(&self.config.base_url, &href))
                    .unwrap_or_default(),
                price: price_sel.as_ref().and_then(|sel| first_text(card, sel)),
                image: image_sel
                    .as_ref()
                    .and_then(|sel| first_attr(card, sel, "src"))
                    .map(|src| resolve_url(&self.config.base_url, &src)),
            })
            .collect();

        Ok(cards)
    }

    /// Builds the offer from the product page of the matched card.
    pub fn parse_detail(&self, html: &str, detail: &DetailSelectors, card: Card) -> Result<Offer> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let read = |selector: &Option<String>| -> Result<Option<String>> {
            match selector.as_deref() {
                Some(selector) => Ok(first_text(root, &parse_selector(selector)?)),
                None => Ok(None),
            }
        };

        let title = read(&detail.title)?.unwrap_or(card.title);
        let sale_price = read(&detail.sale_price)?;
        let regular_price = read(&detail.regular_price)?;
        let image = match detail.image.as_deref() {
            Some(selector) => first_attr(root, &parse_selector(selector)?, "src")
                .map(|src| resolve_url(&self.config.base_url, &src)),
            None => None,
        }
        .or(card.image);

        let mut extra = serde_json::Map::new();
        for (name, selector) in detail.extra_fields() {
            let value = first_text(root, &parse_selector(selector)?).unwrap_or_default();
            extra.insert(name.to_string(), serde_json::Value::String(value));
        }

        Ok(Offer {
            title,
            price: card.price.or(regular_price),
            sale_price,
            link: card.link,
            image,
            extra,
        })
    }

    async fn find_offer(&self, query: &Query) -> Result<Option<Offer>> {
        let html = self.fetch_html(&self.search_url(query)).await?;
        let cards = self.parse_cards(&html)?;

        if cards.is_empty() {
            tracing::info!(provider = %self.config.id, "No products on the search page");
            return Ok(None);
        }

        let Some(card) = self
            .config
            .matching
            .select_first(query.as_str(), &cards, |c| c.title.as_str())
            .cloned()
        else {
            tracing::info!(
                provider = %self.config.id,
                policy = self.config.matching.name(),
                "None of {} products matched \"{}\"",
                cards.len(),
                query
            );
            return Ok(None);
        };

        let offer = match &self.config.detail {
            Some(detail) if !card.link.is_empty() => {
                let page = self.fetch_html(&card.link).await?;
                self.parse_detail(&page, detail, card)?
            }
            _ => Offer {
                title: card.title,
                price: card.price,
                sale_price: None,
                link: card.link,
                image: card.image,
                extra: serde_json::Map::new(),
            },
        };

        tracing::info!(provider = %self.config.id, "Matched \"{}\"", offer.title);
        Ok(Some(offer))
    }
}

#[async_trait]
impl Provider for HtmlProvider {
    fn id(&self) -> &str {
        &self.config.id
    }

    async fn search(&self, query: &Query) -> ProviderOutcome {
        match self.find_offer(query).await {
            Ok(Some(offer)) => ProviderOutcome::Found(offer),
            Ok(None) => ProviderOutcome::NotFound,
            Err(e) => {
                tracing::error!(provider = %self.config.id, "Search failed: {}", e);
                ProviderOutcome::Failed(e.to_string())
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScoutError::ParseError {
        message: format!("invalid selector '{}': {}", selector, e),
    })
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Makes site-relative links absolute.
pub fn resolve_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("{}{}", base.trim_end_matches('/'), href))
}
