//! Chains queried by the name lookups

use serde::{Deserialize, Serialize};

/// Chain enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainKind {
    /// Ethereum mainnet
    EthereumMainnet,
    /// Goerli testnet
    Goerli,
    /// Polygon PoS mainnet
    PolygonMainnet,
    /// Avalanche C-chain
    AvalancheC,
    /// Local hardhat node
    Hardhat,
}

/// Chain configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Chain kind
    pub kind: ChainKind,
    /// Human-readable name
    pub name: &'static str,
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Whether the chain carries real value
    pub is_testnet: bool,
}

impl Chain {
    /// Ethereum mainnet
    pub const fn ethereum() -> Self {
        Self {
            kind: ChainKind::EthereumMainnet,
            name: "mainnet",
            chain_id: 1,
            is_testnet: false,
        }
    }

    /// Goerli testnet
    pub const fn goerli() -> Self {
        Self {
            kind: ChainKind::Goerli,
            name: "goerli",
            chain_id: 5,
            is_testnet: true,
        }
    }

    /// Polygon mainnet
    pub const fn polygon() -> Self {
        Self {
            kind: ChainKind::PolygonMainnet,
            name: "polygon",
            chain_id: 137,
            is_testnet: false,
        }
    }

    /// Avalanche C-chain
    pub const fn avalanche() -> Self {
        Self {
            kind: ChainKind::AvalancheC,
            name: "avalanche",
            chain_id: 43_114,
            is_testnet: false,
        }
    }

    /// Local hardhat node
    pub const fn hardhat() -> Self {
        Self {
            kind: ChainKind::Hardhat,
            name: "hardhat",
            chain_id: 31_337,
            is_testnet: true,
        }
    }

    /// Get chain by kind
    pub const fn from_kind(kind: ChainKind) -> Self {
        match kind {
            ChainKind::EthereumMainnet => Self::ethereum(),
            ChainKind::Goerli => Self::goerli(),
            ChainKind::PolygonMainnet => Self::polygon(),
            ChainKind::AvalancheC => Self::avalanche(),
            ChainKind::Hardhat => Self::hardhat(),
        }
    }
}
