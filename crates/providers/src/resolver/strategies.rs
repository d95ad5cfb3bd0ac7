//! Concrete metadata lookup strategies.
//!
//! Each strategy wraps one lookup mode of the metadata provider. The chain
//! tries them in order: contract address, native-token symbol, free-text
//! name.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::ProjectMetadata;
use crate::provider::ProjectMetadataProvider;

use super::native_tokens::native_symbol;
use super::traits::{MetadataLookup, MetadataStrategy, ResolutionSource};

/// Lookup by contract address. Not applicable when the coin has none.
pub struct ContractStrategy;

#[async_trait]
impl MetadataStrategy for ContractStrategy {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Contract
    }

    async fn attempt(
        &self,
        provider: &dyn ProjectMetadataProvider,
        lookup: &MetadataLookup,
    ) -> Option<Result<Option<ProjectMetadata>, FetchError>> {
        let address = lookup.contract_address.as_deref()?;
        if address.trim().is_empty() {
            return None;
        }
        Some(provider.by_contract(address).await)
    }
}

/// Symbol search for native chain tokens.
///
/// Only applies to coins on the native allow-list; contract-less coins
/// outside the list fall through to the name search instead.
pub struct NativeSymbolStrategy;

#[async_trait]
impl MetadataStrategy for NativeSymbolStrategy {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Symbol
    }

    async fn attempt(
        &self,
        provider: &dyn ProjectMetadataProvider,
        lookup: &MetadataLookup,
    ) -> Option<Result<Option<ProjectMetadata>, FetchError>> {
        let symbol = native_symbol(&lookup.coin_id)?;
        Some(provider.by_symbol(symbol).await)
    }
}

/// Free-text name search. Always applicable; the display name is preferred
/// over the symbol as the query.
pub struct NameStrategy;

#[async_trait]
impl MetadataStrategy for NameStrategy {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Name
    }

    async fn attempt(
        &self,
        provider: &dyn ProjectMetadataProvider,
        lookup: &MetadataLookup,
    ) -> Option<Result<Option<ProjectMetadata>, FetchError>> {
        let query = if lookup.name.trim().is_empty() {
            &lookup.symbol
        } else {
            &lookup.name
        };
        Some(provider.by_name(query).await)
    }
}
