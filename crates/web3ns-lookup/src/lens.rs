//! Lens Protocol handles

use crate::abi::{IErc721, ILensHub};
use crate::lookup::{LookupData, NameLookup};
use crate::rpc::{call_contract, EthCall};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Arc;
use web3ns_params::contracts::LENS_HUB;

/// Lens handle resolver (LensHub on Polygon)
#[derive(Clone)]
pub struct LensLookup {
    client: Arc<dyn EthCall>,
    hub: Address,
}

impl LensLookup {
    /// Create a lookup against the LensHub proxy
    pub fn new(client: Arc<dyn EthCall>) -> Self {
        Self {
            client,
            hub: LENS_HUB,
        }
    }
}

#[async_trait]
impl NameLookup for LensLookup {
    async fn lookup(&self, name: &str) -> Result<LookupData> {
        let profile_id = call_contract(
            self.client.as_ref(),
            self.hub,
            ILensHub::getProfileIdByHandleCall {
                handle: name.to_string(),
            },
        )
        .await?;

        if profile_id == U256::ZERO {
            return Err(Error::NotFound("Lens name was not found".to_string()));
        }

        let owner = call_contract(
            self.client.as_ref(),
            self.hub,
            IErc721::ownerOfCall {
                tokenId: profile_id,
            },
        )
        .await?;

        tracing::debug!("Lens {} is profile {}", name, profile_id);
        Ok(LookupData::new(name, owner))
    }
}
