use httpmock::prelude::*;
use price_scout::{
    build_providers, Aggregator, CanonicalPrice, Provider, ProviderOutcome, Query, ScoutConfig,
};

const SEARCH_PAGE: &str = r#"
<html><body>
  <div class="card">
    <a href="/p/iphone-15-pro"></a><h3>iPhone 15 Pro</h3><span class="price">Tk 1,45,000</span>
  </div>
  <div class="card">
    <a href="/p/iphone-15"></a><h3>iPhone 15 Series</h3><span class="price">Tk 1,20,0</span>
  </div>
</body></html>
"#;

const EMPTY_PAGE: &str = "<html><body><p>No results</p></body></html>";

fn provider_toml(id: &str, base_url: &str, policy: &str) -> String {
    format!(
        r#"
[[providers]]
id = "{id}"
base_url = "{base_url}"
search_path = "/search?q={{query}}"

[providers.selectors]
card = ".card"
title = "h3"
link = "a"
price = ".price"

[providers.matching]
policy = "{policy}"
"#
    )
}

fn single_provider(base_url: &str, policy: &str) -> std::sync::Arc<dyn Provider> {
    let config = ScoutConfig::from_toml_str(&provider_toml("shop", base_url, policy)).unwrap();
    build_providers(&config).unwrap().remove(0)
}

#[tokio::test]
async fn test_exact_match_from_search_page() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(SEARCH_PAGE);
        })
        .await;

    let provider = single_provider(&server.base_url(), "exact");
    let outcome = provider.search(&Query::new("iphone 15").unwrap()).await;

    search.assert_async().await;
    match outcome {
        ProviderOutcome::Found(offer) => {
            assert_eq!(offer.title, "iPhone 15 Series");
            assert_eq!(offer.price.as_deref(), Some("Tk 1,20,0"));
            assert_eq!(offer.link, format!("{}/p/iphone-15", server.base_url()));
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[tokio::test]
async fn test_substring_policy_takes_first_card() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(SEARCH_PAGE);
        })
        .await;

    let provider = single_provider(&server.base_url(), "substring");
    let outcome = provider.search(&Query::new("iPhone 15").unwrap()).await;

    match outcome {
        ProviderOutcome::Found(offer) => assert_eq!(offer.title, "iPhone 15 Pro"),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_cards_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(EMPTY_PAGE);
        })
        .await;

    let provider = single_provider(&server.base_url(), "exact");
    let outcome = provider.search(&Query::new("iPhone 15").unwrap()).await;

    assert_eq!(outcome, ProviderOutcome::NotFound);
}

#[tokio::test]
async fn test_cards_without_match_is_not_found() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(
                r#"<div class="card">
                     <a href="/p/2"></a><h3>iPhone 15 Pro</h3><span class="price">৳ 1,45,000</span>
                   </div>"#,
            );
        })
        .await;

    let provider = single_provider(&server.base_url(), "exact");
    let outcome = provider.search(&Query::new("iPhone 15").unwrap()).await;

    search.assert_async().await;
    assert_eq!(outcome, ProviderOutcome::NotFound);
}

#[tokio::test]
async fn test_http_error_is_failed_outcome() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(503);
        })
        .await;

    let provider = single_provider(&server.base_url(), "exact");
    let outcome = provider.search(&Query::new("iPhone 15").unwrap()).await;

    assert!(matches!(outcome, ProviderOutcome::Failed(_)));
}

#[tokio::test]
async fn test_detail_page_supplies_sale_price() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(
                r#"<div class="product__content">
                     <a href="/product/s24u">
                       <h4 class="product__title">Samsung Galaxy S24 Ultra 256GB</h4>
                     </a>
                   </div>"#,
            );
        })
        .await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/product/s24u");
            then.status(200).body(
                r#"<h1 class="product__title">Samsung Galaxy S24 Ultra</h1>
                   <div class="product__sale_price"><b>৳ 1,39,999</b></div>
                   <del class="product__regular_price">৳ 1,54,999</del>
                   <span class="stock-status">Status:</span><b>In Stock</b>"#,
            );
        })
        .await;

    let toml = format!(
        r#"
[[providers]]
id = "SumashTech"
base_url = "{}"
search_path = "/search?query={{query}}"

[providers.selectors]
card = ".product__content"
title = ".product__title"
link = "a"

[providers.detail]
title = ".product__title"
sale_price = ".product__sale_price b"
regular_price = ".product__regular_price"
status = ".stock-status + b"

[providers.matching]
policy = "substring"
"#,
        server.base_url()
    );
    let config = ScoutConfig::from_toml_str(&toml).unwrap();
    let aggregator = Aggregator::new(build_providers(&config).unwrap());

    let result = aggregator
        .aggregate(&Query::new("Galaxy S24 Ultra").unwrap())
        .await
        .unwrap();

    detail.assert_async().await;
    assert!(result.found);
    let listing = &result.listings[0];
    assert_eq!(listing.title, "Samsung Galaxy S24 Ultra");
    assert_eq!(listing.canonical_price, CanonicalPrice::Known(139999));
    assert_eq!(listing.extra["status"], "In Stock");
    assert_eq!(listing.extra["regular_price"], "৳ 1,54,999");
}

#[tokio::test]
async fn test_three_sites_with_one_match() {
    let found = MockServer::start_async().await;
    found
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(
                r#"<div class="card">
                     <a href="/p/1"></a><h3>iPhone 15</h3><span class="price">৳ 1,200</span>
                   </div>"#,
            );
        })
        .await;
    let empty = MockServer::start_async().await;
    empty
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(EMPTY_PAGE);
        })
        .await;
    let broken = MockServer::start_async().await;
    broken
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(500);
        })
        .await;

    let toml = [
        provider_toml("A", &found.base_url(), "exact"),
        provider_toml("B", &empty.base_url(), "exact"),
        provider_toml("C", &broken.base_url(), "exact"),
    ]
    .join("\n");
    let config = ScoutConfig::from_toml_str(&toml).unwrap();
    let aggregator = Aggregator::new(build_providers(&config).unwrap());

    let result = aggregator
        .aggregate(&Query::new("iPhone 15").unwrap())
        .await
        .unwrap();

    assert!(result.found);
    assert_eq!(result.listings.len(), 1);
    assert_eq!(result.listings[0].source_id, "A");
    assert_eq!(result.listings[0].canonical_price, CanonicalPrice::Known(1200));
    assert_eq!(result.recommended.as_ref(), Some(&result.listings[0]));
    assert_eq!(result.comparison.len(), 1);
    assert_eq!(result.comparison[0].source, "A");
}
