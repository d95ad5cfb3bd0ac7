//! Project metadata payload (tags, investors, similar projects).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Project metadata as returned by the metadata provider.
///
/// `project_name` is the canonical identifying field: a payload with an
/// empty name is treated as "no usable result" by the fallback resolver.
/// Investor and similar-project entries are kept as free-form JSON since
/// only a handful of their fields are ever read downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub one_liner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, rename = "rootdataurl")]
    pub rootdata_url: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub establishment_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub investors: Vec<Value>,
    #[serde(default)]
    pub similar_project: Vec<Value>,
    #[serde(default)]
    pub social_media: Option<Value>,
}

impl ProjectMetadata {
    /// True when the payload carries a usable identifying name.
    pub fn is_usable(&self) -> bool {
        !self.project_name.trim().is_empty()
    }
}
