//! Database model for token records.
//!
//! Scalar fields map to columns directly; the nested sections (price,
//! profile, holders, protocols, chain TVLs, metadata) are persisted as
//! JSON text. Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinlens_core::tokens::{RecordPatch, Symbol, TokenRecord};
use coinlens_providers::HolderPage;

/// Database row for a token record.
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Insertable,
    AsChangeset,
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
)]
#[diesel(table_name = crate::schema::tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TokenRecordDB {
    pub id: String,
    pub symbol: String,
    pub display_name: Option<String>,
    pub source_id: Option<String>,
    pub contract_address: Option<String>,
    pub price: Option<String>,
    pub profile: Option<String>,
    pub holders: String,
    pub protocols: String,
    pub chain_tvls: String,
    pub metadata: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for a same-day refresh; identity columns untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::tokens)]
pub struct TokenRecordPatchDB {
    pub display_name: Option<String>,
    pub source_id: Option<String>,
    pub contract_address: Option<String>,
    pub price: Option<String>,
    pub profile: Option<String>,
    pub holders: String,
    pub protocols: String,
    pub chain_tvls: String,
    pub metadata: Option<String>,
    pub updated_at: String,
}

/// Database row for the current-record index.
#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::current_records)]
#[diesel(primary_key(symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrentRecordDB {
    pub symbol: String,
    pub record_id: String,
    pub updated_at: String,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn to_json_opt<T: Serialize>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(|v| to_json(v))
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<&TokenRecord> for TokenRecordDB {
    fn from(record: &TokenRecord) -> Self {
        TokenRecordDB {
            id: record.id.clone(),
            symbol: record.symbol.to_string(),
            display_name: record.display_name.clone(),
            source_id: record.source_id.clone(),
            contract_address: record.contract_address.clone(),
            price: to_json_opt(&record.price),
            profile: to_json_opt(&record.profile),
            holders: to_json(&record.holders),
            protocols: to_json(&record.protocols),
            chain_tvls: to_json(&record.chain_tvls),
            metadata: to_json_opt(&record.metadata),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

impl From<TokenRecordDB> for TokenRecord {
    fn from(db: TokenRecordDB) -> Self {
        TokenRecord {
            id: db.id,
            symbol: Symbol::new(&db.symbol),
            display_name: db.display_name,
            source_id: db.source_id,
            contract_address: db.contract_address,
            price: db.price.as_deref().and_then(|s| serde_json::from_str(s).ok()),
            profile: db
                .profile
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
            holders: serde_json::from_str::<HolderPage>(&db.holders).unwrap_or_default(),
            protocols: serde_json::from_str(&db.protocols).unwrap_or_default(),
            chain_tvls: serde_json::from_str(&db.chain_tvls).unwrap_or_default(),
            metadata: db
                .metadata
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
            created_at: parse_datetime(&db.created_at),
            updated_at: parse_datetime(&db.updated_at),
        }
    }
}

impl From<&RecordPatch> for TokenRecordPatchDB {
    fn from(patch: &RecordPatch) -> Self {
        TokenRecordPatchDB {
            display_name: patch.display_name.clone(),
            source_id: patch.source_id.clone(),
            contract_address: patch.contract_address.clone(),
            price: to_json_opt(&patch.price),
            profile: to_json_opt(&patch.profile),
            holders: to_json(&patch.holders),
            protocols: to_json(&patch.protocols),
            chain_tvls: to_json(&patch.chain_tvls),
            metadata: to_json_opt(&patch.metadata),
            updated_at: patch.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinlens_providers::PriceSnapshot;

    #[test]
    fn test_round_trip_preserves_sections() {
        let now = Utc::now();
        let record = TokenRecord {
            id: "id-1".to_string(),
            symbol: Symbol::new("btc"),
            display_name: Some("Bitcoin".to_string()),
            source_id: Some("bitcoin".to_string()),
            contract_address: None,
            price: Some(PriceSnapshot {
                usd: Some(64000.5),
                ..Default::default()
            }),
            profile: None,
            holders: HolderPage::default(),
            protocols: vec![],
            chain_tvls: vec![],
            metadata: None,
            created_at: now,
            updated_at: now,
        };

        let db = TokenRecordDB::from(&record);
        assert_eq!(db.symbol, "BTC");
        assert!(db.price.is_some());
        assert!(db.profile.is_none());

        let back = TokenRecord::from(db);
        assert_eq!(back.symbol, record.symbol);
        assert_eq!(back.price, record.price);
        assert_eq!(back.created_at.to_rfc3339(), record.created_at.to_rfc3339());
    }

    #[test]
    fn test_corrupt_json_column_degrades_to_default() {
        let db = TokenRecordDB {
            id: "id-2".to_string(),
            symbol: "ETH".to_string(),
            display_name: None,
            source_id: None,
            contract_address: None,
            price: Some("not json".to_string()),
            profile: None,
            holders: "also not json".to_string(),
            protocols: "[]".to_string(),
            chain_tvls: "[]".to_string(),
            metadata: None,
            created_at: Utc::now().to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
        };

        let record = TokenRecord::from(db);
        assert!(record.price.is_none());
        assert!(record.holders.is_empty());
    }
}
