//! Dune Sim holder distribution provider implementation.
//!
//! This module provides on-chain holder data from the Dune Sim API:
//! - Holder listings via /v1/evm/token-holders/{chain_id}/{address}
//!
//! Authentication is an `X-Sim-Api-Key` header. The endpoint is paginated
//! with an opaque `next_offset` cursor; one call returns one page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::FetchError;
use crate::models::HolderPage;
use crate::provider::HolderProvider;

const BASE_URL: &str = "https://api.sim.dune.com";
const PROVIDER_ID: &str = "DUNE_SIM";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Dune Sim holder distribution provider.
pub struct DuneSimProvider {
    client: Client,
    api_key: String,
}

impl DuneSimProvider {
    /// Create a new Dune Sim provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }
}

#[async_trait]
impl HolderProvider for DuneSimProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_holders(
        &self,
        contract_address: &str,
        chain_id: i64,
    ) -> Result<HolderPage, FetchError> {
        let url = format!(
            "{}/v1/evm/token-holders/{}/{}",
            BASE_URL,
            chain_id,
            urlencoding::encode(contract_address)
        );

        debug!("Fetching holders for {} on chain {}", contract_address, chain_id);

        let response = self
            .client
            .get(&url)
            .header("X-Sim-Api-Key", &self.api_key)
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

        let text = response.text().await.map_err(|e| FetchError::Transport {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to read response: {}", e),
        })?;

        let page: HolderPage = serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse holder page: {}", e),
        })?;

        debug!(
            "Dune Sim: fetched {} holders for {} (more: {})",
            page.holders.len(),
            contract_address,
            page.next_offset.is_some()
        );

        Ok(page)
    }
}
