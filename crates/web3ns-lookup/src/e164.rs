//! E.164 phone-number names (3NUM)
//!
//! A number such as `+14254416889` is an ERC-721 on the 3NUM contract with
//! token id `keccak256(abi.encodePacked(uint56 number))`.

use crate::abi::{IErc721, IThreeNum};
use crate::lookup::{LookupData, NameLookup};
use crate::rpc::{call_contract, EthCall};
use crate::{Error, Result};
use alloy_primitives::aliases::U56;
use alloy_primitives::{keccak256, Address, U256};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};
use web3ns_ccip::{NameDataStore, NameRecord};
use web3ns_params::contracts::THREE_NUM;

const MAX_E164: u64 = (1 << 56) - 1;

/// Parse a phone number with an optional leading `+`
pub fn parse_number(value: &str) -> Result<u64> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidName(format!("{:?} is not an E.164 number", value)));
    }

    digits
        .parse::<u64>()
        .ok()
        .filter(|number| *number <= MAX_E164)
        .ok_or_else(|| Error::InvalidName(format!("{:?} does not fit in uint56", value)))
}

/// 3NUM token id of a number
pub fn token_id(number: u64) -> U256 {
    // abi.encodePacked(uint56) is the low seven big-endian bytes.
    let packed = number.to_be_bytes();
    U256::from_be_bytes(keccak256(&packed[1..]).0)
}

/// Phone-number resolver for the plain lookup API
#[derive(Clone)]
pub struct E164Lookup {
    client: Arc<dyn EthCall>,
    contract: Address,
}

impl E164Lookup {
    /// Create a lookup against the 3NUM contract
    pub fn new(client: Arc<dyn EthCall>) -> Self {
        Self {
            client,
            contract: THREE_NUM,
        }
    }
}

#[async_trait]
impl NameLookup for E164Lookup {
    async fn lookup(&self, name: &str) -> Result<LookupData> {
        let number = parse_number(name)?;
        let number_arg = U56::try_from(number)
            .map_err(|_| Error::InvalidName(format!("{:?} does not fit in uint56", name)))?;

        let token_id = call_contract(
            self.client.as_ref(),
            self.contract,
            IThreeNum::e164uintToTokenIdCall { number: number_arg },
        )
        .await?;

        let owner = call_contract(
            self.client.as_ref(),
            self.contract,
            IErc721::ownerOfCall { tokenId: token_id },
        )
        .await
        .map_err(|e| {
            if e.is_revert_with("invalid token ID") {
                Error::NotFound("E164 name was not found".to_string())
            } else {
                error!("E164 lookup for {} failed: {}", name, e);
                Error::Rpc(format!("E164 name lookup failed: {}", e))
            }
        })?;

        Ok(LookupData::new(name, owner))
    }
}

/// Name-data store backed by 3NUM ownership.
///
/// The first label of the name is the number; the record's owner and
/// Ethereum address are the token owner. Unminted numbers resolve to the
/// zero address.
#[derive(Clone)]
pub struct E164NameStore {
    client: Arc<dyn EthCall>,
    contract: Address,
}

impl E164NameStore {
    /// Create a store reading the 3NUM contract
    pub fn new(client: Arc<dyn EthCall>) -> Self {
        Self {
            client,
            contract: THREE_NUM,
        }
    }
}

#[async_trait]
impl NameDataStore for E164NameStore {
    async fn query_name(&self, name: &str) -> web3ns_ccip::Result<Option<NameRecord>> {
        let label = name.split('.').next().unwrap_or_default();
        let Ok(number) = parse_number(label) else {
            debug!("{} does not start with a phone number", name);
            return Ok(None);
        };

        let owner = match call_contract(
            self.client.as_ref(),
            self.contract,
            IErc721::ownerOfCall {
                tokenId: token_id(number),
            },
        )
        .await
        {
            Ok(owner) => owner,
            Err(Error::Reverted(_)) => Address::ZERO,
            Err(e) => return Err(web3ns_ccip::Error::Store(e.to_string())),
        };

        Ok(Some(NameRecord::owned_by(owner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;
    use alloy_primitives::{address, b256};
    use alloy_sol_types::SolValue;
    use web3ns_params::COIN_TYPE_ETH;

    const OWNER: Address = address!("5555555555555555555555555555555555555555");

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("+14254416889").unwrap(), 14254416889);
        assert_eq!(parse_number("14254416889").unwrap(), 14254416889);
        assert!(parse_number("+").is_err());
        assert!(parse_number("+1-425").is_err());
        assert!(parse_number("+72057594037927936").is_err());
        assert_eq!(parse_number("+72057594037927935").unwrap(), MAX_E164);
    }

    #[test]
    fn test_token_id_packs_seven_bytes() {
        assert_eq!(
            token_id(14254416889),
            U256::from_be_bytes(
                b256!("ddf9b75993e779685c97264eae63493d3d58dbf11693204f488883e17b6cb236").0
            )
        );
    }

    #[tokio::test]
    async fn test_lookup() {
        let number = U56::try_from(14254416889u64).unwrap();
        let chain = MockChain::new()
            .returns(
                THREE_NUM,
                IThreeNum::e164uintToTokenIdCall { number },
                token_id(14254416889).abi_encode(),
            )
            .returns(
                THREE_NUM,
                IErc721::ownerOfCall {
                    tokenId: token_id(14254416889),
                },
                OWNER.abi_encode(),
            );

        let data = E164Lookup::new(Arc::new(chain)).lookup("+14254416889").await.unwrap();
        assert_eq!(data.name, "+14254416889");
        assert_eq!(data.address, OWNER.to_checksum(None));
    }

    #[tokio::test]
    async fn test_lookup_unminted() {
        let number = U56::try_from(15555550100u64).unwrap();
        let chain = MockChain::new()
            .returns(
                THREE_NUM,
                IThreeNum::e164uintToTokenIdCall { number },
                token_id(15555550100).abi_encode(),
            )
            .reverts(
                THREE_NUM,
                IErc721::ownerOfCall {
                    tokenId: token_id(15555550100),
                },
                "ERC721: invalid token ID",
            );

        let err = E164Lookup::new(Arc::new(chain)).lookup("+15555550100").await.unwrap_err();
        assert_eq!(err.to_string(), "E164 name was not found");
    }

    #[tokio::test]
    async fn test_store_record() {
        let chain = MockChain::new().returns(
            THREE_NUM,
            IErc721::ownerOfCall {
                tokenId: token_id(14254416889),
            },
            OWNER.abi_encode(),
        );

        let store = E164NameStore::new(Arc::new(chain));
        let record = store.query_name("+14254416889.3num.eth").await.unwrap().unwrap();
        assert_eq!(record.owner, OWNER);
        assert_eq!(record.address(COIN_TYPE_ETH), Some(OWNER));
    }

    #[tokio::test]
    async fn test_store_unminted_is_zero_owner() {
        let store = E164NameStore::new(Arc::new(MockChain::new()));
        let record = store.query_name("14254416889.3num.eth").await.unwrap().unwrap();
        assert_eq!(record.owner, Address::ZERO);
    }

    #[tokio::test]
    async fn test_store_non_number_and_outage() {
        let store = E164NameStore::new(Arc::new(MockChain::new()));
        assert!(store.query_name("pete.cbdev.eth").await.unwrap().is_none());

        let chain = MockChain::new().fails(
            THREE_NUM,
            IErc721::ownerOfCall {
                tokenId: token_id(14254416889),
            },
            "connection reset",
        );
        let err = E164NameStore::new(Arc::new(chain))
            .query_name("+14254416889.3num.eth")
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 500);
    }
}
