//! Resolution traits for project metadata lookup.
//!
//! Defines the abstractions for resolving a coin to its project metadata
//! through an ordered chain of lookup strategies.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::ProjectMetadata;
use crate::provider::ProjectMetadataProvider;

/// Everything known about a coin before metadata resolution starts.
#[derive(Clone, Debug, Default)]
pub struct MetadataLookup {
    /// Market-data provider id of the coin (e.g. "bitcoin").
    pub coin_id: String,
    /// Upper-cased trading symbol.
    pub symbol: String,
    /// Display name (e.g. "Chainlink").
    pub name: String,
    /// Resolved contract address, if the coin has one.
    pub contract_address: Option<String>,
}

/// Resolution result containing the metadata and how it was found.
#[derive(Clone, Debug)]
pub struct ResolvedMetadata {
    pub metadata: ProjectMetadata,
    /// Where this resolution came from.
    pub source: ResolutionSource,
}

/// Indicates how project metadata was resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionSource {
    /// Contract-address lookup.
    Contract,
    /// Symbol search over the native-token allow-list.
    Symbol,
    /// Free-text name search.
    Name,
    /// Built locally for a native token after the chain was exhausted.
    Synthesized,
}

/// Individual strategy in the resolution chain.
///
/// Strategies are tried in order until one produces metadata.
///
/// # Returns
/// * `None` - this strategy does not apply to the lookup (try next)
/// * `Some(Ok(Some(metadata)))` - resolved, chain stops
/// * `Some(Ok(None))` - provider had no match (try next)
/// * `Some(Err(error))` - provider failed; logged by the chain (try next)
#[async_trait]
pub trait MetadataStrategy: Send + Sync {
    /// The source tag attached to a successful resolution.
    fn source(&self) -> ResolutionSource;

    /// Attempt this strategy against the provider.
    async fn attempt(
        &self,
        provider: &dyn ProjectMetadataProvider,
        lookup: &MetadataLookup,
    ) -> Option<Result<Option<ProjectMetadata>, FetchError>>;
}
