//! Response signing
//!
//! The verifier contract recomputes
//!
//! ```text
//! keccak256(0x19 0x00 ‖ verifier ‖ uint64 expires (big-endian) ‖ keccak256(request) ‖ keccak256(result))
//! ```
//!
//! and recovers the signer from the 65-byte `r ‖ s ‖ v` signature over that
//! digest. The digest is signed as-is, with no EIP-191 personal-message
//! prefix. Signing is deterministic (RFC 6979 nonces).

use crate::{Error, Result};
use alloy_primitives::{hex, keccak256, Address, Bytes, B256};
use rand::RngCore;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use std::fmt;
use zeroize::Zeroizing;

/// Length of an `r ‖ s ‖ v` signature
pub const SIGNATURE_LEN: usize = 65;

/// Resolver signing key material
pub struct ResolverKey(Zeroizing<[u8; 32]>);

impl ResolverKey {
    /// Parse a hex private key, with or without `0x`
    pub fn from_hex(value: &str) -> Result<Self> {
        let value = value.trim();
        let value = value.strip_prefix("0x").unwrap_or(value);

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(value, bytes.as_mut())
            .map_err(|_| Error::Config("Resolver key must be 32 bytes of hex".to_string()))?;

        SecretKey::from_slice(bytes.as_ref())
            .map_err(|_| Error::Config("Resolver key is not a valid secp256k1 scalar".to_string()))?;

        Ok(Self(bytes))
    }

    /// Generate a throwaway key
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = Zeroizing::new([0u8; 32]);
            rng.fill_bytes(bytes.as_mut());
            if SecretKey::from_slice(bytes.as_ref()).is_ok() {
                return Self(bytes);
            }
        }
    }

    fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(self.0.as_ref())
            .map_err(|e| Error::Config(format!("Invalid resolver key: {}", e)))
    }
}

impl fmt::Debug for ResolverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResolverKey(..)")
    }
}

/// Signs gateway responses with the resolver key
pub struct ResponseSigner {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: Address,
}

impl ResponseSigner {
    /// Create a signer from key material
    pub fn new(key: &ResolverKey) -> Result<Self> {
        let secp = Secp256k1::new();
        let secret = key.secret_key()?;
        let address = public_key_address(&PublicKey::from_secret_key(&secp, &secret));

        tracing::info!("Response signer ready for {}", address);

        Ok(Self {
            secp,
            secret,
            address,
        })
    }

    /// Address the signatures recover to
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a response for `verifier`
    pub fn sign(
        &self,
        verifier: Address,
        expires: u64,
        request: &[u8],
        result: &[u8],
    ) -> Result<Bytes> {
        let digest = signature_hash(verifier, expires, request, result);
        let signature = self.sign_digest(&digest)?;
        Ok(Bytes::copy_from_slice(&signature))
    }

    /// Sign a 32-byte digest, returning `r ‖ s ‖ v` with `v` in {27, 28}
    pub fn sign_digest(&self, digest: &B256) -> Result<[u8; SIGNATURE_LEN]> {
        let message = Message::from_slice(digest.as_slice())
            .map_err(|e| Error::Signing(format!("Invalid digest: {}", e)))?;

        let (recovery_id, compact) = self
            .secp
            .sign_ecdsa_recoverable(&message, &self.secret)
            .serialize_compact();

        let mut signature = [0u8; SIGNATURE_LEN];
        signature[..64].copy_from_slice(&compact);
        signature[64] = 27 + recovery_id.to_i32() as u8;
        Ok(signature)
    }
}

impl fmt::Debug for ResponseSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Digest the verifier contract checks the signature against
pub fn signature_hash(verifier: Address, expires: u64, request: &[u8], result: &[u8]) -> B256 {
    let mut message = Vec::with_capacity(2 + 20 + 8 + 32 + 32);
    message.extend_from_slice(&[0x19, 0x00]);
    message.extend_from_slice(verifier.as_slice());
    message.extend_from_slice(&expires.to_be_bytes());
    message.extend_from_slice(keccak256(request).as_slice());
    message.extend_from_slice(keccak256(result).as_slice());
    keccak256(&message)
}

/// Recover the signer address of an `r ‖ s ‖ v` signature over `digest`
pub fn recover_signer(digest: &B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != SIGNATURE_LEN {
        return Err(Error::Signing(format!(
            "Signature must be {} bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        )));
    }

    let v = match signature[64] {
        v @ 27..=28 => v - 27,
        v @ 0..=1 => v,
        v => return Err(Error::Signing(format!("Invalid recovery byte {}", v))),
    };

    let recovery_id = RecoveryId::from_i32(i32::from(v))
        .map_err(|e| Error::Signing(format!("Invalid recovery id: {}", e)))?;
    let signature = RecoverableSignature::from_compact(&signature[..64], recovery_id)
        .map_err(|e| Error::Signing(format!("Invalid signature: {}", e)))?;
    let message = Message::from_slice(digest.as_slice())
        .map_err(|e| Error::Signing(format!("Invalid digest: {}", e)))?;

    let public_key = Secp256k1::verification_only()
        .recover_ecdsa(&message, &signature)
        .map_err(|e| Error::Signing(format!("Recovery failed: {}", e)))?;

    Ok(public_key_address(&public_key))
}

fn public_key_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    Address::from_slice(&keccak256(&uncompressed[1..])[12..])
}
