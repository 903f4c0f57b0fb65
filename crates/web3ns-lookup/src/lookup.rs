//! Lookup results and adapter capabilities

use crate::Result;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Forward lookup result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupData {
    /// Name as queried
    pub name: String,
    /// Resolved address; empty when the name has none
    pub address: String,
    /// Phone record; empty when unset
    pub phone: String,
}

impl LookupData {
    /// Result for `name` resolving to `address` with no phone record
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address: format_address(address),
            phone: String::new(),
        }
    }

    /// Set the phone record
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// Checksummed address, or the empty string for the zero address
pub(crate) fn format_address(address: Address) -> String {
    if address == Address::ZERO {
        String::new()
    } else {
        address.to_checksum(None)
    }
}

/// Names registered to an address on one chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainNames {
    /// Primary name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Other names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,
}

impl ChainNames {
    /// Entry holding only a primary name, if there is one
    pub fn primary(name: Option<String>) -> Self {
        Self {
            name,
            alt_names: None,
        }
    }
}

/// Farcaster registration of an address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarcasterId {
    /// Decimal Farcaster id; `"0"` when unregistered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,
}

/// Reverse lookup result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookupData {
    /// ENS names
    pub eth: ChainNames,
    /// Avvy names
    pub avax: ChainNames,
    /// Farcaster id
    pub farcaster: FarcasterId,
}

/// Forward lookup capability
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// Resolve `name` to an address
    async fn lookup(&self, name: &str) -> Result<LookupData>;
}

/// Reverse lookup capability
#[async_trait]
pub trait ReverseLookup: Send + Sync {
    /// Primary name of `address`, if any
    async fn reverse(&self, address: Address) -> Result<Option<String>>;
}
