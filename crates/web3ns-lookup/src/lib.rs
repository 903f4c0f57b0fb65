//! Name lookups across chains
//!
//! Resolves `.eth` (ENS), `.avax` (Avvy), `.lens` (Lens), E.164 phone
//! numbers (3NUM) and Farcaster handles to addresses, and addresses back to
//! names. Every adapter is a thin read-only `eth_call` client; results are
//! cached for five minutes in a [`KvStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod abi;
pub mod address;
pub mod avax;
pub mod cache;
pub mod e164;
pub mod ens;
pub mod farcaster;
pub mod lens;
pub mod lookup;
pub mod router;
pub mod rpc;

#[cfg(test)]
pub(crate) mod testing;

pub use address::AddressLookup;
pub use avax::{AvaxLookup, AvvyRecord, AvvyRecords};
pub use cache::{KvStore, LookupCache, MemoryKvStore};
pub use e164::{E164Lookup, E164NameStore};
pub use ens::EnsLookup;
pub use farcaster::{FarcasterLookup, FidLookup};
pub use lens::LensLookup;
pub use lookup::{AddressLookupData, ChainNames, FarcasterId, LookupData, NameLookup, ReverseLookup};
pub use router::{LookupRouter, Route};
pub use rpc::{EthCall, EthRpcClient};

use web3ns_ccip::{ErrorBody, ErrorKind};

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Name has no owner or record
    #[error("{0}")]
    NotFound(String),

    /// Name cannot be looked up as given
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Suffix recognised but no adapter is configured for it
    #[error("{0}")]
    Unsupported(String),

    /// Transport or JSON-RPC failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The contract call reverted
    #[error("Execution reverted: {0}")]
    Reverted(String),

    /// Return data did not match the expected ABI
    #[error("Decode error: {0}")]
    Decode(String),

    /// Cache store failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Error kind exposed to clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidName(_) => ErrorKind::InvalidRequest,
            Error::Unsupported(_) => ErrorKind::NotImplemented,
            Error::Rpc(_)
            | Error::Reverted(_)
            | Error::Decode(_)
            | Error::Cache(_)
            | Error::Serialization(_) => ErrorKind::InternalError,
        }
    }

    /// HTTP status for this error
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// JSON body sent to the client
    pub fn to_body(&self) -> ErrorBody {
        match self.kind() {
            ErrorKind::InternalError => ErrorBody::internal(),
            kind => ErrorBody::new(kind, self.to_string()),
        }
    }

    /// Check if a revert carries `needle` in its reason
    pub(crate) fn is_revert_with(&self, needle: &str) -> bool {
        matches!(self, Error::Reverted(reason) if reason.contains(needle))
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
