//! Avalanche (Avvy Domains) names
//!
//! Avvy resolution goes through its own client library, so the adapter
//! talks to it through [`AvvyRecords`] and only owns the record fallback
//! order and the error shape.

use crate::lookup::{LookupData, NameLookup, ReverseLookup};
use crate::{Error, Result};
use alloy_primitives::Address;
use async_trait::async_trait;
use std::sync::Arc;

/// Avvy standard record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvvyRecord {
    /// X-Chain address
    XChain,
    /// P-Chain address
    PChain,
    /// C-Chain / EVM address
    Evm,
    /// Phone number
    Phone,
}

impl AvvyRecord {
    /// Record id used by the Avvy resolver contracts
    pub fn id(&self) -> u32 {
        match self {
            Self::XChain => 1,
            Self::PChain => 2,
            Self::Evm => 3,
            Self::Phone => 9,
        }
    }
}

/// Access to Avvy name records
#[async_trait]
pub trait AvvyRecords: Send + Sync {
    /// Check if `name` is registered
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Read one record of `name`; `None` when unset
    async fn resolve(&self, name: &str, record: AvvyRecord) -> Result<Option<String>>;

    /// Primary name of `address`, if any
    async fn reverse(&self, address: Address) -> Result<Option<String>>;
}

/// `.avax` resolver
#[derive(Clone)]
pub struct AvaxLookup {
    records: Arc<dyn AvvyRecords>,
}

impl AvaxLookup {
    /// Create a lookup over an Avvy client
    pub fn new(records: Arc<dyn AvvyRecords>) -> Self {
        Self { records }
    }

    async fn address(&self, name: &str) -> Result<Option<String>> {
        for record in [AvvyRecord::Evm, AvvyRecord::PChain, AvvyRecord::XChain] {
            match self.records.resolve(name, record).await? {
                Some(address) if !address.is_empty() => return Ok(Some(address)),
                _ => {}
            }
        }
        Ok(None)
    }
}

fn not_found() -> Error {
    Error::NotFound("Avvy name was not found".to_string())
}

#[async_trait]
impl NameLookup for AvaxLookup {
    async fn lookup(&self, name: &str) -> Result<LookupData> {
        if !self.records.exists(name).await? {
            return Err(not_found());
        }

        let address = self.address(name).await?.ok_or_else(not_found)?;

        let phone = self
            .records
            .resolve(name, AvvyRecord::Phone)
            .await?
            .filter(|phone| !phone.is_empty())
            .ok_or_else(|| Error::NotFound("Avvy name did not have a phone number".to_string()))?;

        Ok(LookupData {
            name: name.to_string(),
            address,
            phone,
        })
    }
}

#[async_trait]
impl ReverseLookup for AvaxLookup {
    async fn reverse(&self, address: Address) -> Result<Option<String>> {
        self.records.reverse(address).await
    }
}
