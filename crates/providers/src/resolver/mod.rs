//! Project metadata resolution.
//!
//! Resolves a coin to its project metadata through an ordered chain of
//! lookup strategies (contract address, native symbol, name search), with
//! a local synthesis fallback for native chain tokens.

mod chain;
mod native_tokens;
mod strategies;
mod traits;

pub use chain::MetadataResolver;
pub use native_tokens::{is_native_token, native_symbol};
pub use strategies::{ContractStrategy, NameStrategy, NativeSymbolStrategy};
pub use traits::{MetadataLookup, MetadataStrategy, ResolutionSource, ResolvedMetadata};
