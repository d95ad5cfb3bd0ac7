//! Resolver chain - composite resolver that tries strategies in order.
//!
//! The resolver chain is the entry point for project metadata resolution.
//! It combines the lookup strategies and tries them in order until one
//! produces usable metadata.

use tracing::{debug, warn};

use crate::models::ProjectMetadata;
use crate::provider::ProjectMetadataProvider;

use super::native_tokens::{is_native_token, native_symbol};
use super::strategies::{ContractStrategy, NameStrategy, NativeSymbolStrategy};
use super::traits::{MetadataLookup, MetadataStrategy, ResolutionSource, ResolvedMetadata};

/// Composite resolver that tries multiple lookup strategies in order.
///
/// The resolution order is:
/// 1. Contract-address lookup (when the coin has a contract)
/// 2. Symbol search (native chain tokens only)
/// 3. Free-text name search
///
/// The chain stops at the first strategy that returns usable metadata.
/// A strategy returning `None` does not apply to the lookup; a strategy
/// returning an empty result or an error falls through to the next one.
///
/// When every strategy is exhausted and the coin is a recognized native
/// token, a minimal metadata payload is synthesized locally so the record
/// still carries an identity section. The resolver itself never errors.
pub struct MetadataResolver {
    strategies: Vec<Box<dyn MetadataStrategy>>,
}

impl MetadataResolver {
    /// Create a new resolver with the default strategy order.
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(ContractStrategy),
                Box::new(NativeSymbolStrategy),
                Box::new(NameStrategy),
            ],
        }
    }

    /// Add a custom strategy to the end of the chain.
    pub fn add_strategy(&mut self, strategy: Box<dyn MetadataStrategy>) {
        self.strategies.push(strategy);
    }

    /// Resolve project metadata for a coin.
    pub async fn resolve(
        &self,
        provider: &dyn ProjectMetadataProvider,
        lookup: &MetadataLookup,
    ) -> Option<ResolvedMetadata> {
        for strategy in &self.strategies {
            match strategy.attempt(provider, lookup).await {
                None => continue,
                Some(Ok(Some(metadata))) if metadata.is_usable() => {
                    debug!(
                        "Resolved metadata for {} via {:?}",
                        lookup.coin_id,
                        strategy.source()
                    );
                    return Some(ResolvedMetadata {
                        metadata,
                        source: strategy.source(),
                    });
                }
                Some(Ok(_)) => {
                    debug!(
                        "No metadata for {} via {:?}, trying next",
                        lookup.coin_id,
                        strategy.source()
                    );
                }
                Some(Err(e)) => {
                    warn!(
                        "Metadata lookup via {:?} failed for {}: {}",
                        strategy.source(),
                        lookup.coin_id,
                        e
                    );
                }
            }
        }

        if is_native_token(&lookup.coin_id) {
            debug!("Synthesizing native-token metadata for {}", lookup.coin_id);
            return Some(ResolvedMetadata {
                metadata: synthesize_native(lookup),
                source: ResolutionSource::Synthesized,
            });
        }

        None
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a minimal local payload for a native token no source covered.
fn synthesize_native(lookup: &MetadataLookup) -> ProjectMetadata {
    let symbol = native_symbol(&lookup.coin_id)
        .map(|s| s.to_string())
        .unwrap_or_else(|| lookup.symbol.to_uppercase());

    ProjectMetadata {
        project_name: lookup.name.clone(),
        token_symbol: Some(symbol),
        description: Some(format!(
            "{} is the native token of the {} blockchain.",
            lookup.name, lookup.name
        )),
        active: Some(true),
        ..Default::default()
    }
}
