//! Farcaster names and ids
//!
//! A Farcaster name is an ERC-721 on the name registry whose token id is
//! the ASCII name right-padded to 32 bytes. Ids live on the id registry.

use crate::abi::{IErc721, IFarcasterIdRegistry};
use crate::lookup::{LookupData, NameLookup};
use crate::rpc::{call_contract, EthCall};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Arc;
use web3ns_params::contracts::{FARCASTER_ID_REGISTRY, FARCASTER_NAME_REGISTRY};

/// Farcaster id of an address
#[async_trait]
pub trait FidLookup: Send + Sync {
    /// Registered id; zero when the address has none
    async fn fid(&self, address: Address) -> Result<U256>;
}

/// Farcaster registry client
#[derive(Clone)]
pub struct FarcasterLookup {
    client: Arc<dyn EthCall>,
    name_registry: Address,
    id_registry: Address,
}

impl FarcasterLookup {
    /// Create a lookup against the Goerli registries
    pub fn new(client: Arc<dyn EthCall>) -> Self {
        Self {
            client,
            name_registry: FARCASTER_NAME_REGISTRY,
            id_registry: FARCASTER_ID_REGISTRY,
        }
    }

    /// Token id of a name
    pub fn token_id(name: &str) -> Result<U256> {
        if name.is_empty() || !name.is_ascii() || name.len() > 32 {
            return Err(Error::InvalidName(format!(
                "{:?} is not a Farcaster name",
                name
            )));
        }

        let mut word = [0u8; 32];
        word[..name.len()].copy_from_slice(name.as_bytes());
        Ok(U256::from_be_bytes(word))
    }
}

#[async_trait]
impl NameLookup for FarcasterLookup {
    async fn lookup(&self, name: &str) -> Result<LookupData> {
        let token_id = Self::token_id(name)?;

        let owner = call_contract(
            self.client.as_ref(),
            self.name_registry,
            IErc721::ownerOfCall { tokenId: token_id },
        )
        .await
        .map_err(|e| {
            if e.is_revert_with("invalid token ID") {
                Error::NotFound("Farcaster name was not found".to_string())
            } else {
                tracing::error!("Farcaster lookup for {} failed: {}", name, e);
                Error::Rpc(format!("Farcaster name lookup failed: {}", e))
            }
        })?;

        Ok(LookupData::new(name, owner))
    }
}

#[async_trait]
impl FidLookup for FarcasterLookup {
    async fn fid(&self, address: Address) -> Result<U256> {
        call_contract(
            self.client.as_ref(),
            self.id_registry,
            IFarcasterIdRegistry::idOfCall { owner: address },
        )
        .await
    }
}
