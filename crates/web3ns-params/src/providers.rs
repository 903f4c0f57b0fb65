//! JSON-RPC provider URLs per deployment environment

use crate::{Chain, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALCHEMY_ETH_MAINNET_URL: &str = "https://eth-mainnet.alchemyapi.io/v2/";
const ALCHEMY_POLYGON_MAINNET_URL: &str = "https://polygon-mainnet.g.alchemy.com/v2/";
const ALCHEMY_ETH_GOERLI_URL: &str = "https://eth-goerli.g.alchemy.com/v2/";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Production
    #[serde(rename = "prd")]
    Production,
    /// Staging
    #[serde(rename = "stg")]
    Staging,
}

impl Environment {
    /// Short tag used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "prd",
            Self::Staging => "stg",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prd" | "production" => Ok(Self::Production),
            "stg" | "staging" => Ok(Self::Staging),
            other => Err(Error::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Provider endpoints for each chain the lookups query
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Environment these endpoints were built for
    pub environment: Environment,
    /// Ethereum (ENS, 3NUM) endpoint
    pub eth_api: String,
    /// Ethereum chain behind `eth_api`
    pub eth_chain: Chain,
    /// Polygon (Lens) endpoint
    pub polygon_api: String,
    /// Farcaster registry endpoint
    pub farcaster_api: String,
}

impl ProviderConfig {
    /// Build the endpoint table for an environment.
    ///
    /// Staging moves Ethereum lookups to Goerli; Polygon and Farcaster
    /// endpoints are shared by both environments.
    pub fn new(environment: Environment, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let (eth_api, eth_chain) = match environment {
            Environment::Production => (
                format!("{}{}", ALCHEMY_ETH_MAINNET_URL, api_key),
                Chain::ethereum(),
            ),
            Environment::Staging => (
                format!("{}{}", ALCHEMY_ETH_GOERLI_URL, api_key),
                Chain::goerli(),
            ),
        };

        Ok(Self {
            environment,
            eth_api,
            eth_chain,
            polygon_api: format!("{}{}", ALCHEMY_POLYGON_MAINNET_URL, api_key),
            farcaster_api: format!("{}{}", ALCHEMY_ETH_GOERLI_URL, api_key),
        })
    }
}

// Endpoints embed the API key.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("environment", &self.environment)
            .field("eth_chain", &self.eth_chain.name)
            .finish_non_exhaustive()
    }
}
