// Adapters layer: concrete providers behind the `Provider` port.

pub mod html;

use crate::config::{HttpConfig, ScoutConfig};
use crate::core::Provider;
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub use html::HtmlProvider;

pub fn build_client(http: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(Duration::from_secs(http.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(client)
}

/// One provider per configured site, in configuration order, sharing a client.
pub fn build_providers(config: &ScoutConfig) -> Result<Vec<Arc<dyn Provider>>> {
    let client = build_client(&config.http)?;

    let providers = config
        .providers
        .iter()
        .map(|provider| {
            let timeout = Duration::from_secs(provider.timeout_seconds(&config.http));
            let provider = HtmlProvider::new(provider.clone(), client.clone(), timeout);
            Arc::new(provider) as Arc<dyn Provider>
        })
        .collect();

    Ok(providers)
}
