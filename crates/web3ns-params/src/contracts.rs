//! Third-party contract deployments

use alloy_primitives::{address, Address};

/// ENS registry (same address on mainnet and Goerli)
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// 3NUM E.164 phone-number NFT contract
pub const THREE_NUM: Address = address!("385137A9f5a298cC620471b1CFf4F4c070afF4b9");

/// Lens Protocol LensHub proxy on Polygon
pub const LENS_HUB: Address = address!("Db46d1Dc155634FbC732f92E853b10B288AD5a1d");

/// Farcaster name registry on Goerli
pub const FARCASTER_NAME_REGISTRY: Address =
    address!("e3be01d99baa8db9905b33a3ca391238234b79d1");

/// Farcaster id registry on Goerli
pub const FARCASTER_ID_REGISTRY: Address = address!("DA107A1CAf36d198B12c16c7B6a1d1C795978C42");

/// Default on-chain offchain-resolver verifier used on local deployments
pub const DEFAULT_VERIFIER: Address = address!("C5273AbFb36550090095B1EDec019216AD21BE6c");
