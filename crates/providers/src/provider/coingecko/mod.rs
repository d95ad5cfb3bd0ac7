//! CoinGecko market data provider implementation.
//!
//! This module provides market data from the CoinGecko API:
//! - Symbol search via /search endpoint
//! - Coin profiles via /coins/{id} endpoint
//! - Spot quotes via /simple/price endpoint
//!
//! The free tier is rate limited per minute and answers HTTP 429 when
//! exceeded. API documentation: https://docs.coingecko.com/reference
//!
//! All calls are bounded by a 10 second timeout; no internal retries.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::FetchError;
use crate::models::{CoinProfile, CoinSummary, PriceSnapshot};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Coin hits; other sections (exchanges, nfts) are ignored
    #[serde(default)]
    coins: Vec<CoinSummary>,
}

/// Error envelope CoinGecko returns on non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ============================================================================
// CoinGeckoProvider
// ============================================================================

/// CoinGecko market data provider.
///
/// Works unauthenticated against the public endpoints; an optional demo
/// API key raises the rate limit when supplied.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a new CoinGecko provider. `api_key` is optional.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the CoinGecko API.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self.client.get(&url);

        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("CoinGecko request: {} with {} params", endpoint, params.len());

        let response = request
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

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(FetchError::Transport {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

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

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn search(&self, query: &str) -> Result<Vec<CoinSummary>, FetchError> {
        debug!("Searching CoinGecko for '{}'", query);

        let params = [("query", query)];
        let text = self.fetch("/search", &params).await?;

        let response: SearchResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse search response: {}", e),
            })?;

        debug!(
            "CoinGecko: found {} search results for '{}'",
            response.coins.len(),
            query
        );

        Ok(response.coins)
    }

    async fn detail(&self, coin_id: &str) -> Result<CoinProfile, FetchError> {
        debug!("Fetching profile for {} from CoinGecko", coin_id);

        // Trim the payload to the sections we consume.
        let params = [
            ("localization", "false"),
            ("tickers", "false"),
            ("community_data", "false"),
            ("developer_data", "false"),
            ("sparkline", "false"),
        ];
        let endpoint = format!("/coins/{}", urlencoding::encode(coin_id));
        let text = self.fetch(&endpoint, &params).await?;

        serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse coin profile: {}", e),
        })
    }

    async fn quote(&self, coin_id: &str) -> Result<Option<PriceSnapshot>, FetchError> {
        debug!("Fetching quote for {} from CoinGecko", coin_id);

        let params = [
            ("ids", coin_id),
            ("vs_currencies", "usd"),
            ("include_market_cap", "true"),
            ("include_24hr_vol", "true"),
            ("include_24hr_change", "true"),
        ];
        let text = self.fetch("/simple/price", &params).await?;

        // Keyed by coin id; an unknown id yields an empty object.
        let mut by_id: HashMap<String, PriceSnapshot> =
            serde_json::from_str(&text).map_err(|e| FetchError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse price response: {}", e),
            })?;

        Ok(by_id.remove(coin_id).map(|mut snapshot| {
            snapshot.last_updated = Some(Utc::now());
            snapshot
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = CoinGeckoProvider::new(None);
        assert_eq!(provider.id(), "COINGECKO");
    }

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "coins": [
                {"id": "chainlink", "name": "Chainlink", "symbol": "LINK", "market_cap_rank": 12},
                {"id": "chainge-finance", "name": "Chainge", "symbol": "XCHNG"}
            ],
            "exchanges": []
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.coins.len(), 2);
        assert_eq!(response.coins[0].id, "chainlink");
        assert_eq!(response.coins[0].symbol, "LINK");
    }

    #[test]
    fn test_search_response_no_coins() {
        let response: SearchResponse = serde_json::from_str(r#"{"exchanges": []}"#).unwrap();
        assert!(response.coins.is_empty());
    }

    #[test]
    fn test_price_response_keyed_by_id() {
        let json = r#"{
            "bitcoin": {
                "usd": 64000.5,
                "usd_market_cap": 1260000000000.0,
                "usd_24h_vol": 32000000000.0,
                "usd_24h_change": -1.25
            }
        }"#;

        let by_id: HashMap<String, PriceSnapshot> = serde_json::from_str(json).unwrap();
        let snapshot = &by_id["bitcoin"];
        assert_eq!(snapshot.usd, Some(64000.5));
        assert_eq!(snapshot.usd_24h_change, Some(-1.25));
        assert!(snapshot.last_updated.is_none());
    }

    #[test]
    fn test_price_response_unknown_id_is_empty() {
        let by_id: HashMap<String, PriceSnapshot> = serde_json::from_str("{}").unwrap();
        assert!(by_id.get("no-such-coin").is_none());
    }
}
