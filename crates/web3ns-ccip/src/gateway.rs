//! CCIP-Read gateway handler
//!
//! One call to [`CcipGateway::handle`] answers one `(sender, callData)`
//! request from an offchain-resolver verifier:
//!
//! 1. parse `sender` and `callData`
//! 2. reject senders other than the configured verifier
//! 3. check the outer selector and ABI-decode `resolve(bytes,bytes)`
//! 4. decode the DNS-wire name and dispatch the inner resolver call
//! 5. sign `(verifier, expires, callData, result)` and ABI-encode
//!    `(bytes result, uint64 expires, bytes sig)`
//!
//! The handler holds no mutable state; concurrent requests share the
//! signer and the store read-only.

use crate::abi::IResolverService;
use crate::config::GatewayConfig;
use crate::dispatcher::Dispatcher;
use crate::signer::ResponseSigner;
use crate::store::NameDataStore;
use crate::{dns_wire, Error, Result};
use alloy_primitives::{hex, Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};
use web3ns_params::SIGNATURE_TTL_SECS;

/// Selector of `resolve(bytes,bytes)`
pub const RESOLVE_SELECTOR: [u8; 4] = <IResolverService::resolveCall as SolCall>::SELECTOR;

/// A parsed gateway request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Contract that forwarded the call
    pub sender: Address,
    /// Outer `resolve(bytes,bytes)` calldata
    pub call_data: Bytes,
}

impl ResolveRequest {
    /// Parse the hex `sender` and `callData` of an HTTP request.
    ///
    /// Both must be `0x`-prefixed. A mixed-case sender must carry a valid
    /// EIP-55 checksum.
    pub fn parse(sender: &str, call_data: &str) -> Result<Self> {
        let sender = parse_address(sender).ok_or_else(invalid_sender_or_call_data)?;
        let call_data = parse_bytes(call_data).ok_or_else(invalid_sender_or_call_data)?;

        Ok(Self { sender, call_data })
    }
}

fn invalid_sender_or_call_data() -> Error {
    Error::InvalidRequest("Invalid sender or callData".to_string())
}

fn parse_address(value: &str) -> Option<Address> {
    let digits = value.strip_prefix("0x")?;
    if digits.len() != 40 {
        return None;
    }

    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower {
        return Address::parse_checksummed(value, None).ok();
    }

    Address::from_str(value).ok()
}

fn parse_bytes(value: &str) -> Option<Bytes> {
    let digits = value.strip_prefix("0x")?;
    hex::decode(digits).ok().map(Bytes::from)
}

/// Signed answer to a resolve request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedResult {
    /// ABI-encoded return value of the inner call
    pub result: Bytes,
    /// Unix time after which the verifier rejects the answer
    pub expires: u64,
    /// `r ‖ s ‖ v` signature
    pub signature: Bytes,
}

impl SignedResult {
    /// ABI-encode as `(bytes result, uint64 expires, bytes sig)`
    pub fn abi_encode(&self) -> Bytes {
        let encoded = (self.result.clone(), self.expires, self.signature.clone()).abi_encode_params();
        Bytes::from(encoded)
    }

    /// Decode an encoded `(bytes, uint64, bytes)` tuple
    pub fn abi_decode(data: &[u8]) -> Result<Self> {
        let (result, expires, signature) = <(Bytes, u64, Bytes)>::abi_decode_params(data)
            .map_err(|e| Error::InvalidRequest(format!("Invalid signed result: {}", e)))?;
        Ok(Self {
            result,
            expires,
            signature,
        })
    }
}

/// Successful gateway response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// ABI-encoded [`SignedResult`]
    pub data: Bytes,
}

/// CCIP-Read gateway
pub struct CcipGateway {
    verifier: Address,
    signer: ResponseSigner,
    dispatcher: Dispatcher,
}

impl CcipGateway {
    /// Create a gateway.
    ///
    /// Fails when the config names a signer address the key does not
    /// derive to.
    pub fn new(
        config: &GatewayConfig,
        signer: ResponseSigner,
        store: Arc<dyn NameDataStore>,
    ) -> Result<Self> {
        config.validate()?;

        if let Some(expected) = config.signer_address {
            if expected != signer.address() {
                return Err(Error::Config(format!(
                    "Resolver key derives to {}, config expects {}",
                    signer.address(),
                    expected
                )));
            }
        }

        info!(
            "CCIP gateway serving verifier {} as signer {}",
            config.verifier_address,
            signer.address()
        );

        Ok(Self {
            verifier: config.verifier_address,
            signer,
            dispatcher: Dispatcher::new(store),
        })
    }

    /// Verifier contract the gateway answers for
    pub fn verifier(&self) -> Address {
        self.verifier
    }

    /// Address the response signatures recover to
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Handle a raw `(sender, callData)` request at the current time
    pub async fn handle(&self, sender: &str, call_data: &str) -> Result<GatewayResponse> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Internal(format!("System clock before epoch: {}", e)))?
            .as_secs();
        self.handle_at(sender, call_data, now).await
    }

    /// Handle a raw request as if the current Unix time were `now`
    pub async fn handle_at(
        &self,
        sender: &str,
        call_data: &str,
        now: u64,
    ) -> Result<GatewayResponse> {
        let outcome = match ResolveRequest::parse(sender, call_data) {
            Ok(request) => self.resolve(&request, now).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(signed) => Ok(GatewayResponse {
                data: signed.abi_encode(),
            }),
            Err(e) => {
                match e.kind() {
                    crate::ErrorKind::InternalError => error!("CCIP request failed: {}", e),
                    _ => warn!("CCIP request rejected: {}", e),
                }
                Err(e)
            }
        }
    }

    /// Resolve a parsed request and sign the answer
    pub async fn resolve(&self, request: &ResolveRequest, now: u64) -> Result<SignedResult> {
        if request.sender != self.verifier {
            return Err(Error::InvalidRequest(format!(
                "Invalid sender contract {}",
                request.sender
            )));
        }

        let selector = request.call_data.get(..4).unwrap_or(&request.call_data[..]);
        if selector != RESOLVE_SELECTOR {
            return Err(Error::InvalidRequest(format!(
                "No implementation for function with selector 0x{}",
                hex::encode(selector)
            )));
        }

        let call = IResolverService::resolveCall::abi_decode(&request.call_data)
            .map_err(|e| Error::InvalidRequest(format!("Invalid resolve arguments: {}", e)))?;

        let name = dns_wire::decode(&call.name)?;
        debug!(name = %name, "Decoded resolve request");

        let result = self.dispatcher.dispatch(&name, &call.data).await?;

        let expires = now
            .checked_add(SIGNATURE_TTL_SECS)
            .ok_or_else(|| Error::Internal("Expiry overflows u64".to_string()))?;
        let signature = self
            .signer
            .sign(self.verifier, expires, &request.call_data, &result)?;

        debug!(name = %name, expires, "Signed resolve response");

        Ok(SignedResult {
            result,
            expires,
            signature,
        })
    }
}

impl std::fmt::Debug for CcipGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcipGateway")
            .field("verifier", &self.verifier)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
