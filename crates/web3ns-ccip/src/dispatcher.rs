//! Sub-call dispatch
//!
//! Answers one resolver sub-call for one decoded name. Missing records are
//! valid answers (zero address, empty string, empty bytes); only malformed,
//! spoofed or unsupported calls fail.

use crate::name::{is_normalized, namehash};
use crate::store::{NameDataStore, NameRecord};
use crate::subcall::SubCall;
use crate::{Error, Result};
use alloy_primitives::{hex, Address, Bytes};
use alloy_sol_types::SolValue;
use std::sync::Arc;
use tracing::debug;
use web3ns_params::COIN_TYPE_ETH;

/// Routes decoded sub-calls to the name-data store
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn NameDataStore>,
}

impl Dispatcher {
    /// Create a dispatcher over a store
    pub fn new(store: Arc<dyn NameDataStore>) -> Self {
        Self { store }
    }

    /// Decode `inner` and answer it for `name`.
    ///
    /// Returns the ABI-encoded return value of the sub-call.
    pub async fn dispatch(&self, name: &str, inner: &[u8]) -> Result<Bytes> {
        let call = SubCall::decode(inner)?;
        self.dispatch_call(name, &call).await
    }

    /// Answer an already decoded sub-call for `name`
    pub async fn dispatch_call(&self, name: &str, call: &SubCall) -> Result<Bytes> {
        if !is_normalized(name) {
            return Err(Error::InvalidRequest(format!(
                "Name {:?} is not normalized",
                name
            )));
        }

        let expected = namehash(name);
        if call.node() != expected {
            return Err(Error::InvalidRequest(format!(
                "Node 0x{} does not match name {:?}",
                hex::encode(call.node()),
                name
            )));
        }

        // pubkey records are not served by this gateway.
        if let SubCall::Pubkey { .. } = call {
            return Err(pubkey_not_implemented());
        }

        debug!("Dispatching {} for {}", call.signature(), name);

        let record = self.store.query_name(name).await?.unwrap_or_default();

        answer(call, &record)
    }
}

fn pubkey_not_implemented() -> Error {
    Error::NotImplemented("pubkey(bytes32) is not implemented".to_string())
}

fn answer(call: &SubCall, record: &NameRecord) -> Result<Bytes> {
    let encoded = match call {
        SubCall::Addr { .. } => record
            .address(COIN_TYPE_ETH)
            .unwrap_or(Address::ZERO)
            .abi_encode(),
        SubCall::AddrMulticoin { coin_type, .. } => {
            let address = u64::try_from(*coin_type)
                .ok()
                .and_then(|coin_type| record.address(coin_type))
                .unwrap_or(Address::ZERO);
            Bytes::copy_from_slice(address.as_slice()).abi_encode()
        }
        SubCall::Text { key, .. } => record.text.get(key).cloned().unwrap_or_default().abi_encode(),
        SubCall::Contenthash { .. } => record.contenthash.abi_encode(),
        SubCall::Pubkey { .. } => return Err(pubkey_not_implemented()),
    };

    Ok(Bytes::from(encoded))
}
