//! Field reconciler.
//!
//! Pure projection of raw adapter payloads into the canonical record shape.
//! No I/O happens here; a failed adapter shows up as an absent section and
//! reconciliation substitutes structurally-empty defaults. Values are kept
//! raw; formatting is a presentation concern.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use coinlens_providers::{
    ChainTvl, CoinProfile, CoinSummary, HolderPage, PriceSnapshot, ProjectMetadata, Protocol,
};

use super::model::TokenRecord;
use super::types::Symbol;

/// Raw adapter outputs for one reconciliation.
///
/// `summary` is the chosen search hit; everything else is optional because
/// any adapter may have failed or returned a valid empty result.
#[derive(Debug, Clone, Default)]
pub struct RawSections {
    pub summary: CoinSummary,
    pub profile: Option<CoinProfile>,
    pub quote: Option<PriceSnapshot>,
    pub protocols: Vec<Protocol>,
    pub chain_tvls: Vec<ChainTvl>,
    pub metadata: Option<ProjectMetadata>,
    pub holders: Option<HolderPage>,
}

/// Project the raw sections into a canonical record.
///
/// The protocol list is filtered to entries related to the symbol; the
/// chain table is attached verbatim. `now` becomes both timestamps; the
/// upsert decides later whether `created_at` survives.
pub fn reconcile(sections: RawSections, now: DateTime<Utc>) -> TokenRecord {
    let symbol = Symbol::new(&sections.summary.symbol);
    let contract_address = sections
        .profile
        .as_ref()
        .and_then(resolve_contract_address);
    let protocols = related_protocols(sections.protocols, &symbol);

    TokenRecord {
        id: Uuid::new_v4().to_string(),
        symbol,
        display_name: Some(sections.summary.name.clone()),
        source_id: Some(sections.summary.id.clone()),
        contract_address,
        price: sections.quote,
        profile: sections.profile,
        holders: sections.holders.unwrap_or_default(),
        protocols,
        chain_tvls: sections.chain_tvls,
        metadata: sections.metadata,
        created_at: now,
        updated_at: now,
    }
}

/// First non-empty contract address across the fallback chain: the profile's
/// top-level field, then each entry of the per-chain platform map in map
/// order.
pub fn resolve_contract_address(profile: &CoinProfile) -> Option<String> {
    if let Some(address) = &profile.contract_address {
        if !address.trim().is_empty() {
            return Some(address.clone());
        }
    }

    profile
        .detail_platforms
        .values()
        .filter_map(|platform| platform.contract_address.as_ref())
        .find(|address| !address.trim().is_empty())
        .cloned()
}

/// Filter protocols to those textually related to the symbol: the protocol
/// name contains the symbol (case-insensitive substring) or its own symbol
/// equals it (case-insensitive exact).
pub fn related_protocols(protocols: Vec<Protocol>, symbol: &Symbol) -> Vec<Protocol> {
    let needle = symbol.as_str().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    protocols
        .into_iter()
        .filter(|protocol| {
            protocol.name.to_lowercase().contains(&needle)
                || protocol
                    .symbol
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(symbol.as_str()))
        })
        .collect()
}
