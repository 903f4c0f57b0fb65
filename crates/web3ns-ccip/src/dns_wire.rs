//! DNS wire-format names
//!
//! `resolve(bytes name, bytes data)` carries the queried name as a sequence of
//! length-prefixed labels terminated by a zero byte, e.g. `pete.cbdev.eth`
//! travels as `\x04pete\x05cbdev\x03eth\x00`. Compression pointers are not
//! part of this encoding and are rejected like any other oversized length.

use crate::{Error, Result};

/// Maximum length of a single label in bytes
pub const MAX_LABEL_LEN: usize = 63;

/// Decode a DNS wire-format name into its dotted form.
///
/// Decoding stops at the first zero-length label; bytes after the
/// terminator are ignored. A buffer that ends on a label boundary without a
/// terminator is accepted.
pub fn decode(buf: &[u8]) -> Result<String> {
    let mut labels: Vec<&str> = Vec::new();
    let mut offset = 0;

    while offset < buf.len() {
        let len = buf[offset] as usize;
        if len == 0 {
            break;
        }

        if len > MAX_LABEL_LEN {
            return Err(Error::MalformedName(format!(
                "label length {} at offset {} exceeds {}",
                len, offset, MAX_LABEL_LEN
            )));
        }

        let start = offset + 1;
        let end = start + len;
        let bytes = buf.get(start..end).ok_or_else(|| {
            Error::MalformedName(format!(
                "truncated label at offset {}: need {} bytes, have {}",
                offset,
                len,
                buf.len() - start
            ))
        })?;

        let label = std::str::from_utf8(bytes).map_err(|_| {
            Error::MalformedName(format!("label at offset {} is not valid UTF-8", offset))
        })?;
        if label.contains('.') {
            return Err(Error::MalformedName(format!(
                "label at offset {} contains a dot",
                offset
            )));
        }

        labels.push(label);
        offset = end;
    }

    Ok(labels.join("."))
}

/// Encode a dotted name into DNS wire format, including the terminator.
///
/// The empty name encodes to the root (a single zero byte).
pub fn encode(name: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(name.len() + 2);

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() {
                return Err(Error::MalformedName(format!("empty label in {:?}", name)));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::MalformedName(format!(
                    "label {:?} is {} bytes, limit is {}",
                    label,
                    label.len(),
                    MAX_LABEL_LEN
                )));
            }
            bytes.push(label.len() as u8);
            bytes.extend_from_slice(label.as_bytes());
        }
    }

    bytes.push(0);
    Ok(bytes)
}
