//! CCIP-Read offchain resolution gateway
//!
//! This crate implements the gateway side of an offchain resolver: it
//! decodes `resolve(bytes name, bytes data)` calls forwarded by the on-chain
//! verifier, answers the embedded resolver sub-call from a name-data store,
//! and returns a signed, time-boxed response the verifier can check on-chain.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod abi;
pub mod config;
pub mod dispatcher;
pub mod dns_wire;
pub mod error;
pub mod gateway;
pub mod name;
pub mod signer;
pub mod store;
pub mod subcall;

pub use config::GatewayConfig;
pub use dispatcher::Dispatcher;
pub use error::{Error, ErrorBody, ErrorKind, Result};
pub use gateway::{CcipGateway, GatewayResponse, ResolveRequest, SignedResult, RESOLVE_SELECTOR};
pub use name::{namehash, normalize};
pub use signer::{recover_signer, signature_hash, ResolverKey, ResponseSigner};
pub use store::{MemoryNameStore, NameDataStore, NameRecord};
pub use subcall::SubCall;
