//! Static name records file

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use alloy_primitives::Address;
use web3ns_ccip::{normalize, MemoryNameStore, NameRecord};
use web3ns_params::COIN_TYPE_ETH;

/// Load a JSON map of name to record.
///
/// Names are normalized on load so lookups by normalized name find them. A
/// record without an Ethereum address answers `addr` with its owner.
pub fn load_records(path: &Path) -> web3ns_ccip::Result<MemoryNameStore> {
    let json = fs::read_to_string(path)?;
    let raw: HashMap<String, NameRecord> = serde_json::from_str(&json)?;

    let mut store = MemoryNameStore::new();
    for (name, mut record) in raw {
        if record.owner != Address::ZERO {
            record.addresses.entry(COIN_TYPE_ETH).or_insert(record.owner);
        }
        store.insert(normalize(&name)?, record);
    }

    tracing::info!("Loaded {} name records from {}", store.len(), path.display());
    Ok(store)
}
