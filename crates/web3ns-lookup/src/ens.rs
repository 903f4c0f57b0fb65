//! ENS lookups
//!
//! Forward: registry `resolver(node)`, then `addr(node)` and the `phone`
//! text record on that resolver. Reverse: the same two hops on
//! `<address>.addr.reverse`, then a forward check that the claimed name
//! resolves back to the address.

use crate::abi::{IEnsRegistry, IEnsResolver};
use crate::lookup::{LookupData, NameLookup, ReverseLookup};
use crate::rpc::{call_contract, EthCall};
use crate::{Error, Result};
use alloy_primitives::{hex, Address, B256};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use web3ns_ccip::{namehash, normalize};
use web3ns_params::contracts::ENS_REGISTRY;

const PHONE_TEXT_KEY: &str = "phone";

/// ENS resolver
#[derive(Clone)]
pub struct EnsLookup {
    client: Arc<dyn EthCall>,
    registry: Address,
}

impl EnsLookup {
    /// Create a lookup against the canonical registry
    pub fn new(client: Arc<dyn EthCall>) -> Self {
        Self::with_registry(client, ENS_REGISTRY)
    }

    /// Create a lookup against a specific registry deployment
    pub fn with_registry(client: Arc<dyn EthCall>, registry: Address) -> Self {
        Self { client, registry }
    }

    async fn resolver(&self, node: B256) -> Result<Option<Address>> {
        let resolver = call_contract(
            self.client.as_ref(),
            self.registry,
            IEnsRegistry::resolverCall { node },
        )
        .await?;

        Ok((resolver != Address::ZERO).then_some(resolver))
    }

    async fn forward_address(&self, name: &str) -> Result<Option<Address>> {
        let node = namehash(name);
        let Some(resolver) = self.resolver(node).await? else {
            return Ok(None);
        };

        let address =
            call_contract(self.client.as_ref(), resolver, IEnsResolver::addrCall { node }).await?;
        Ok((address != Address::ZERO).then_some(address))
    }
}

#[async_trait]
impl NameLookup for EnsLookup {
    async fn lookup(&self, name: &str) -> Result<LookupData> {
        let name = normalize(name).map_err(|e| Error::InvalidName(e.to_string()))?;
        let node = namehash(&name);

        let resolver = self
            .resolver(node)
            .await?
            .ok_or_else(|| Error::NotFound("ENS name was not found".to_string()))?;

        let address_call = call_contract(self.client.as_ref(), resolver, IEnsResolver::addrCall { node });
        let phone_call = call_contract(
            self.client.as_ref(),
            resolver,
            IEnsResolver::textCall {
                node,
                key: PHONE_TEXT_KEY.to_string(),
            },
        );
        let (address, phone) = futures::join!(address_call, phone_call);

        // Resolvers without text support revert; that just means no phone.
        let phone = match phone {
            Ok(phone) => phone,
            Err(Error::Reverted(_)) => String::new(),
            Err(e) => return Err(e),
        };

        debug!("ENS {} resolved via {}", name, resolver);
        Ok(LookupData::new(name, address?).with_phone(phone))
    }
}

#[async_trait]
impl ReverseLookup for EnsLookup {
    async fn reverse(&self, address: Address) -> Result<Option<String>> {
        let reverse_name = format!("{}.addr.reverse", hex::encode(address));
        let node = namehash(&reverse_name);

        let Some(resolver) = self.resolver(node).await? else {
            return Ok(None);
        };

        let name = match call_contract(self.client.as_ref(), resolver, IEnsResolver::nameCall { node }).await {
            Ok(name) => name,
            Err(Error::Reverted(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        if name.is_empty() {
            return Ok(None);
        }

        // A reverse record is only a claim until the name points back.
        if self.forward_address(&name).await? != Some(address) {
            debug!("ENS reverse record {} for {} does not resolve back", name, address);
            return Ok(None);
        }

        Ok(Some(name))
    }
}
