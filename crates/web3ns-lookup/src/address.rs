//! Reverse lookups: address to names

use crate::cache::LookupCache;
use crate::ens::EnsLookup;
use crate::farcaster::{FarcasterLookup, FidLookup};
use crate::lookup::{AddressLookupData, ChainNames, FarcasterId, ReverseLookup};
use crate::rpc::EthRpcClient;
use crate::{Error, Result};
use alloy_primitives::Address;
use std::str::FromStr;
use std::sync::Arc;
use web3ns_params::ProviderConfig;

/// Collects the names an address holds on every supported chain
pub struct AddressLookup {
    ens: Arc<dyn ReverseLookup>,
    avax: Option<Arc<dyn ReverseLookup>>,
    farcaster: Arc<dyn FidLookup>,
    cache: LookupCache,
}

impl AddressLookup {
    /// Create a reverse lookup from individual adapters
    pub fn new(
        ens: Arc<dyn ReverseLookup>,
        farcaster: Arc<dyn FidLookup>,
        cache: LookupCache,
    ) -> Self {
        Self {
            ens,
            avax: None,
            farcaster,
            cache,
        }
    }

    /// Create the RPC-backed adapters for a provider table
    pub fn from_providers(
        providers: &ProviderConfig,
        http: reqwest::Client,
        cache: LookupCache,
    ) -> Self {
        let eth = Arc::new(EthRpcClient::with_client(providers.eth_api.clone(), http.clone()));
        let farcaster = Arc::new(EthRpcClient::with_client(providers.farcaster_api.clone(), http));

        Self::new(
            Arc::new(EnsLookup::new(eth)),
            Arc::new(FarcasterLookup::new(farcaster)),
            cache,
        )
    }

    /// Include Avvy names
    pub fn with_avax(mut self, avax: Arc<dyn ReverseLookup>) -> Self {
        self.avax = Some(avax);
        self
    }

    /// Parse a hex address from a request path
    pub fn parse_address(value: &str) -> Result<Address> {
        Address::from_str(value)
            .map_err(|_| Error::InvalidName(format!("{:?} is not an address", value)))
    }

    /// Look up every name of `address`, served from cache when fresh
    pub async fn lookup(&self, address: Address) -> Result<AddressLookupData> {
        let key = address.to_checksum(None);
        self.cache.execute(&key, self.fetch(address)).await
    }

    async fn fetch(&self, address: Address) -> Result<AddressLookupData> {
        let avax = async {
            match &self.avax {
                Some(avax) => avax.reverse(address).await,
                None => Ok(None),
            }
        };

        let (eth, avax, fid) = futures::try_join!(
            self.ens.reverse(address),
            avax,
            self.farcaster.fid(address)
        )?;

        Ok(AddressLookupData {
            eth: ChainNames::primary(eth),
            avax: ChainNames::primary(avax),
            farcaster: FarcasterId {
                fid: Some(fid.to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryKvStore;
    use alloy_primitives::{address, U256};
    use async_trait::async_trait;

    const HOLDER: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    struct Names(Option<&'static str>);

    #[async_trait]
    impl ReverseLookup for Names {
        async fn reverse(&self, address: Address) -> Result<Option<String>> {
            Ok(self.0.filter(|_| address == HOLDER).map(str::to_string))
        }
    }

    struct Fid(u64);

    #[async_trait]
    impl FidLookup for Fid {
        async fn fid(&self, address: Address) -> Result<U256> {
            Ok(if address == HOLDER { U256::from(self.0) } else { U256::ZERO })
        }
    }

    struct Down;

    #[async_trait]
    impl ReverseLookup for Down {
        async fn reverse(&self, _address: Address) -> Result<Option<String>> {
            Err(Error::Rpc("upstream unavailable".to_string()))
        }
    }

    fn cache() -> LookupCache {
        LookupCache::new(Arc::new(MemoryKvStore::new()))
    }

    #[tokio::test]
    async fn test_collects_all_chains() {
        let lookup = AddressLookup::new(Arc::new(Names(Some("vitalik.eth"))), Arc::new(Fid(5650)), cache())
            .with_avax(Arc::new(Names(Some("vitalik.avax"))));

        let data = lookup.lookup(HOLDER).await.unwrap();
        assert_eq!(data.eth.name.as_deref(), Some("vitalik.eth"));
        assert_eq!(data.avax.name.as_deref(), Some("vitalik.avax"));
        assert_eq!(data.farcaster.fid.as_deref(), Some("5650"));
    }

    #[tokio::test]
    async fn test_unknown_address() {
        let lookup = AddressLookup::new(Arc::new(Names(Some("vitalik.eth"))), Arc::new(Fid(5650)), cache());

        let data = lookup
            .lookup(address!("2222222222222222222222222222222222222222"))
            .await
            .unwrap();
        assert_eq!(data.eth.name, None);
        assert_eq!(data.avax.name, None);
        assert_eq!(data.farcaster.fid.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let lookup = AddressLookup::new(Arc::new(Down), Arc::new(Fid(1)), cache());
        let err = lookup.lookup(HOLDER).await.unwrap_err();
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            AddressLookup::parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap(),
            HOLDER
        );
        assert!(matches!(
            AddressLookup::parse_address("vitalik.eth"),
            Err(Error::InvalidName(_))
        ));
    }
}
