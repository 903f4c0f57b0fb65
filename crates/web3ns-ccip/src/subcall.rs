//! Resolver sub-calls carried in the `data` argument of `resolve`

use crate::abi::IResolver;
use crate::{Error, Result};
use alloy_primitives::{hex, B256, U256};
use alloy_sol_types::{SolCall, SolInterface};

const SUPPORTED_SELECTORS: [[u8; 4]; 5] = [
    <IResolver::addr_0Call as SolCall>::SELECTOR,
    <IResolver::addr_1Call as SolCall>::SELECTOR,
    <IResolver::textCall as SolCall>::SELECTOR,
    <IResolver::contenthashCall as SolCall>::SELECTOR,
    <IResolver::pubkeyCall as SolCall>::SELECTOR,
];

/// A decoded resolver sub-call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubCall {
    /// `addr(bytes32)`
    Addr {
        /// Name node
        node: B256,
    },
    /// `addr(bytes32,uint256)`
    AddrMulticoin {
        /// Name node
        node: B256,
        /// SLIP-44 / ENSIP-11 coin type
        coin_type: U256,
    },
    /// `text(bytes32,string)`
    Text {
        /// Name node
        node: B256,
        /// Record key
        key: String,
    },
    /// `contenthash(bytes32)`
    Contenthash {
        /// Name node
        node: B256,
    },
    /// `pubkey(bytes32)`
    Pubkey {
        /// Name node
        node: B256,
    },
}

impl SubCall {
    /// Decode an ABI-encoded sub-call.
    ///
    /// Fails with `InvalidRequest` for any selector outside the five
    /// supported resolver functions or for malformed arguments.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| Error::InvalidRequest("Resolver call data is too short".to_string()))?;

        if !SUPPORTED_SELECTORS.contains(&selector) {
            return Err(Error::InvalidRequest(format!(
                "Unsupported resolver function with selector 0x{}",
                hex::encode(selector)
            )));
        }

        let call = IResolver::IResolverCalls::abi_decode(data).map_err(|e| {
            Error::InvalidRequest(format!("Invalid resolver call arguments: {}", e))
        })?;

        Ok(match call {
            IResolver::IResolverCalls::addr_0(c) => SubCall::Addr { node: c.node },
            IResolver::IResolverCalls::addr_1(c) => SubCall::AddrMulticoin {
                node: c.node,
                coin_type: c.coinType,
            },
            IResolver::IResolverCalls::text(c) => SubCall::Text {
                node: c.node,
                key: c.key,
            },
            IResolver::IResolverCalls::contenthash(c) => SubCall::Contenthash { node: c.node },
            IResolver::IResolverCalls::pubkey(c) => SubCall::Pubkey { node: c.node },
        })
    }

    /// ABI-encode the sub-call with its selector
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            SubCall::Addr { node } => IResolver::addr_0Call { node: *node }.abi_encode(),
            SubCall::AddrMulticoin { node, coin_type } => IResolver::addr_1Call {
                node: *node,
                coinType: *coin_type,
            }
            .abi_encode(),
            SubCall::Text { node, key } => IResolver::textCall {
                node: *node,
                key: key.clone(),
            }
            .abi_encode(),
            SubCall::Contenthash { node } => {
                IResolver::contenthashCall { node: *node }.abi_encode()
            }
            SubCall::Pubkey { node } => IResolver::pubkeyCall { node: *node }.abi_encode(),
        }
    }

    /// Node the call asks about
    pub fn node(&self) -> B256 {
        match self {
            SubCall::Addr { node }
            | SubCall::AddrMulticoin { node, .. }
            | SubCall::Text { node, .. }
            | SubCall::Contenthash { node }
            | SubCall::Pubkey { node } => *node,
        }
    }

    /// Solidity signature, for logs and error messages
    pub fn signature(&self) -> &'static str {
        match self {
            SubCall::Addr { .. } => "addr(bytes32)",
            SubCall::AddrMulticoin { .. } => "addr(bytes32,uint256)",
            SubCall::Text { .. } => "text(bytes32,string)",
            SubCall::Contenthash { .. } => "contenthash(bytes32)",
            SubCall::Pubkey { .. } => "pubkey(bytes32)",
        }
    }
}
