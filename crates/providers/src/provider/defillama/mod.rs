//! DefiLlama TVL provider implementation.
//!
//! This module provides locked-value data from the DefiLlama API:
//! - Protocol listings via /protocols endpoint
//! - Chain totals via /v2/chains endpoint
//!
//! Both endpoints are provider-wide listings; filtering down to one token
//! happens downstream. The API is unauthenticated.
//! API documentation: https://defillama.com/docs/api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::FetchError;
use crate::models::{ChainTvl, Protocol};
use crate::provider::{ChainTvlProvider, ProtocolTvlProvider};

const BASE_URL: &str = "https://api.llama.fi";
const PROVIDER_ID: &str = "DEFILLAMA";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// DefiLlama TVL provider.
///
/// Serves both the protocol listing and the chain totals; the two
/// capability traits are implemented on the same client.
pub struct DefiLlamaProvider {
    client: Client,
}

impl DefiLlamaProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Make a GET request to the DefiLlama API.
    async fn fetch(&self, endpoint: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        debug!("DefiLlama request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_send_error(PROVIDER_ID, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to read response: {}", e),
        })
    }
}

impl Default for DefiLlamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProtocolTvlProvider for DefiLlamaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_protocols(&self) -> Result<Vec<Protocol>, FetchError> {
        let text = self.fetch("/protocols").await?;

        let protocols: Vec<Protocol> =
            serde_json::from_str(&text).map_err(|e| FetchError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse protocol listing: {}", e),
            })?;

        debug!("DefiLlama: fetched {} protocols", protocols.len());

        Ok(protocols)
    }
}

#[async_trait]
impl ChainTvlProvider for DefiLlamaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_chains(&self) -> Result<Vec<ChainTvl>, FetchError> {
        let text = self.fetch("/v2/chains").await?;

        let chains: Vec<ChainTvl> = serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse chain listing: {}", e),
        })?;

        debug!("DefiLlama: fetched {} chains", chains.len());

        Ok(chains)
    }
}
