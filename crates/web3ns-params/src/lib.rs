//! Web3NS chain parameters and deployment constants
//!
//! This crate provides the chains the gateway talks to, the provider URL
//! table per deployment environment, the third-party contract addresses,
//! and the coin types and TTLs shared by the lookup and CCIP surfaces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chains;
pub mod contracts;
pub mod providers;

pub use chains::{Chain, ChainKind};
pub use providers::{Environment, ProviderConfig};

/// SLIP-44 coin type for Ethereum mainnet addresses.
pub const COIN_TYPE_ETH: u64 = 60;

/// Lifetime of a signed CCIP answer, in seconds.
pub const SIGNATURE_TTL_SECS: u64 = 300;

/// Lifetime of a cached lookup result, in seconds.
pub const LOOKUP_CACHE_TTL_SECS: u64 = 5 * 60;

/// Name suffixes served by the plain lookup API.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".eth", ".avax", ".lens", "cb.id"];

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown deployment environment
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// Missing provider API key
    #[error("Provider API key was not given")]
    MissingApiKey,
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
