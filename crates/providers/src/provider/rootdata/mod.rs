//! RootData project metadata provider implementation.
//!
//! This module provides project metadata from the RootData open API:
//! - Contract-address lookup via POST /get_item
//! - Symbol search via POST /search_projects
//! - Free-text name search via POST /search_by_name
//!
//! Every call is a POST with a JSON body and the API key in an `apikey`
//! header. Responses wrap the payload in an envelope whose `data` field is
//! either a single project object or an array of search hits; both shapes
//! normalize to at most one [`ProjectMetadata`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::FetchError;
use crate::models::ProjectMetadata;
use crate::provider::ProjectMetadataProvider;

const BASE_URL: &str = "https://api.rootdata.com/open";
const PROVIDER_ID: &str = "ROOTDATA";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// API Response Structures
// ============================================================================

/// Envelope wrapping every RootData response.
///
/// `data` is a project object for /get_item and an array for the two
/// search endpoints. A missing or null `data` means no match.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

// ============================================================================
// RootDataProvider
// ============================================================================

/// RootData project metadata provider.
pub struct RootDataProvider {
    client: Client,
    api_key: String,
}

impl RootDataProvider {
    /// Create a new RootData provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// POST a JSON body to a RootData endpoint and return the raw text.
    async fn post(&self, endpoint: &str, body: &Value) -> Result<String, FetchError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        debug!("RootData request: {}", endpoint);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Accept", "application/json")
            .json(body)
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

    /// POST and normalize the envelope to at most one project.
    async fn lookup(&self, endpoint: &str, body: Value) -> Result<Option<ProjectMetadata>, FetchError> {
        let text = self.post(endpoint, &body).await?;

        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response envelope: {}", e),
        })?;

        let Some(data) = envelope.data else {
            debug!(
                "RootData: no data for {} ({})",
                endpoint,
                envelope.message.as_deref().unwrap_or("no message")
            );
            return Ok(None);
        };

        let candidate = match data {
            Value::Array(items) => items.into_iter().next(),
            Value::Object(_) => Some(data),
            _ => None,
        };

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let metadata: ProjectMetadata =
            serde_json::from_value(candidate).map_err(|e| FetchError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse project payload: {}", e),
            })?;

        // A payload without an identifying name is treated as a no-match.
        if metadata.is_usable() {
            Ok(Some(metadata))
        } else {
            Ok(None)
        }
    }
}

// ============================================================================
// ProjectMetadataProvider Implementation
// ============================================================================

#[async_trait]
impl ProjectMetadataProvider for RootDataProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn by_contract(&self, address: &str) -> Result<Option<ProjectMetadata>, FetchError> {
        debug!("RootData lookup by contract {}", address);
        let body = json!({
            "contract_address": address,
            "include_team": true,
            "include_investors": true,
        });
        self.lookup("/get_item", body).await
    }

    async fn by_symbol(&self, symbol: &str) -> Result<Option<ProjectMetadata>, FetchError> {
        debug!("RootData lookup by symbol {}", symbol);
        let body = json!({
            "symbol": symbol,
            "include_team": true,
            "include_investors": true,
        });
        self.lookup("/search_projects", body).await
    }

    async fn by_name(&self, name: &str) -> Result<Option<ProjectMetadata>, FetchError> {
        debug!("RootData lookup by name '{}'", name);
        let body = json!({
            "project_name": name,
            "include_team": true,
            "include_investors": true,
        });
        self.lookup("/search_by_name", body).await
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
        let provider = RootDataProvider::new("test_key".to_string());
        assert_eq!(provider.id(), "ROOTDATA");
    }

    #[test]
    fn test_envelope_with_project_object() {
        let json = r#"{
            "result": 200,
            "data": {
                "project_name": "Chainlink",
                "token_symbol": "LINK",
                "one_liner": "Decentralized oracle network",
                "rootdataurl": "https://www.rootdata.com/Projects/detail/Chainlink",
                "tags": ["Infra", "Oracle"]
            }
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let metadata: ProjectMetadata = serde_json::from_value(envelope.data.unwrap()).unwrap();
        assert_eq!(metadata.project_name, "Chainlink");
        assert_eq!(metadata.token_symbol.as_deref(), Some("LINK"));
        assert_eq!(
            metadata.rootdata_url.as_deref(),
            Some("https://www.rootdata.com/Projects/detail/Chainlink")
        );
        assert_eq!(metadata.tags, vec!["Infra", "Oracle"]);
    }

    #[test]
    fn test_envelope_with_search_array_takes_first() {
        let json = r#"{
            "result": 200,
            "data": [
                {"project_name": "Ethereum", "token_symbol": "ETH"},
                {"project_name": "Ethereum Classic", "token_symbol": "ETC"}
            ]
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        let first = match data {
            Value::Array(items) => items.into_iter().next().unwrap(),
            _ => panic!("expected array"),
        };
        let metadata: ProjectMetadata = serde_json::from_value(first).unwrap();
        assert_eq!(metadata.project_name, "Ethereum");
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"result": 404, "message": "not found"}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("not found"));
    }

    #[test]
    fn test_unnamed_payload_is_unusable() {
        let metadata: ProjectMetadata =
            serde_json::from_str(r#"{"project_name": "  ", "token_symbol": "X"}"#).unwrap();
        assert!(!metadata.is_usable());
    }
}
