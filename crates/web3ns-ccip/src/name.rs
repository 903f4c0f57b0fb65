//! Name normalization and EIP-137 namehash
//!
//! The gateway only answers for names that are already in normal form, so
//! the name that reaches the store is exactly the name whose hash the
//! verifier asked about. Normal form here is:
//!
//! - labels separated by `.`, none of them empty
//! - every label lower-cased with Unicode case mapping
//! - no whitespace, control characters or URL/path metacharacters
//! - at most 63 bytes per label (the DNS-wire limit)

use crate::dns_wire::MAX_LABEL_LEN;
use crate::{Error, Result};
use alloy_primitives::{keccak256, B256};

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '@', '#', '?', '%', ':', '"', '<', '>', '|'];

/// Normalize a dotted name.
///
/// The empty string is the root name and normalizes to itself.
pub fn normalize(name: &str) -> Result<String> {
    if name.is_empty() {
        return Ok(String::new());
    }

    let mut labels = Vec::new();
    for label in name.split('.') {
        labels.push(normalize_label(label)?);
    }

    Ok(labels.join("."))
}

/// Check that a name is already in normal form
pub fn is_normalized(name: &str) -> bool {
    matches!(normalize(name), Ok(normalized) if normalized == name)
}

fn normalize_label(label: &str) -> Result<String> {
    if label.is_empty() {
        return Err(Error::InvalidRequest("Name contains an empty label".to_string()));
    }

    if let Some(ch) = label
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(c))
    {
        return Err(Error::InvalidRequest(format!(
            "Name label {:?} contains disallowed character {:?}",
            label, ch
        )));
    }

    let lowered = label.to_lowercase();
    if lowered.len() > MAX_LABEL_LEN {
        return Err(Error::InvalidRequest(format!(
            "Name label {:?} exceeds {} bytes",
            label, MAX_LABEL_LEN
        )));
    }

    Ok(lowered)
}

/// Hash of a single label
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Compute the namehash of a dotted name (EIP-137).
///
/// The input is hashed as given; callers normalize first.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(labelhash(label).as_slice());
        node = keccak256(buf);
    }

    node
}
