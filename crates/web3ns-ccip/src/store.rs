//! Name-data store capability
//!
//! The gateway reads records through [`NameDataStore`]; where the records
//! live (a chain, a KV namespace, a static file) is up to the implementor.

use crate::Result;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use web3ns_params::COIN_TYPE_ETH;

/// Records stored for a name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Owner of the name
    pub owner: Address,
    /// Addresses by coin type
    #[serde(default)]
    pub addresses: BTreeMap<u64, Address>,
    /// Text records
    #[serde(default)]
    pub text: BTreeMap<String, String>,
    /// Content hash; empty when unset
    #[serde(default)]
    pub contenthash: Bytes,
}

impl NameRecord {
    /// Record owned by `owner` with its Ethereum address set to the owner
    pub fn owned_by(owner: Address) -> Self {
        let mut record = Self {
            owner,
            ..Self::default()
        };
        record.addresses.insert(COIN_TYPE_ETH, owner);
        record
    }

    /// Set an address for a coin type
    pub fn with_address(mut self, coin_type: u64, address: Address) -> Self {
        self.addresses.insert(coin_type, address);
        self
    }

    /// Set a text record
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.insert(key.into(), value.into());
        self
    }

    /// Set the content hash
    pub fn with_contenthash(mut self, contenthash: Bytes) -> Self {
        self.contenthash = contenthash;
        self
    }

    /// Address for a coin type
    pub fn address(&self, coin_type: u64) -> Option<Address> {
        self.addresses.get(&coin_type).copied()
    }
}

/// Read-only lookup of name records
#[async_trait]
pub trait NameDataStore: Send + Sync {
    /// Fetch the record for a normalized name; `None` when the name is unknown
    async fn query_name(&self, name: &str) -> Result<Option<NameRecord>>;
}

/// In-memory store with fixed records
#[derive(Debug, Clone, Default)]
pub struct MemoryNameStore {
    records: HashMap<String, NameRecord>,
}

impl MemoryNameStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record
    pub fn with_record(mut self, name: impl Into<String>, record: NameRecord) -> Self {
        self.insert(name, record);
        self
    }

    /// Insert or replace a record
    pub fn insert(&mut self, name: impl Into<String>, record: NameRecord) {
        self.records.insert(name.into(), record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl NameDataStore for MemoryNameStore {
    async fn query_name(&self, name: &str) -> Result<Option<NameRecord>> {
        Ok(self.records.get(name).cloned())
    }
}
