//! Gateway configuration
//!
//! Loaded once at startup and handed to the gateway by reference. Secrets
//! are not part of this file; the resolver key travels as a
//! [`ResolverKey`](crate::ResolverKey).

use crate::{Error, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use web3ns_params::contracts::DEFAULT_VERIFIER;
use web3ns_params::Environment;

/// Persistent gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Deployment environment
    #[serde(default = "default_environment")]
    pub environment: Environment,
    /// The only verifier contract answers are signed for
    pub verifier_address: Address,
    /// Expected signer address; checked against the key at startup
    #[serde(default)]
    pub signer_address: Option<Address>,
    /// Static name records (JSON map of name to record)
    #[serde(default)]
    pub records_path: Option<PathBuf>,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_environment() -> Environment {
    Environment::Staging
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            environment: default_environment(),
            verifier_address: DEFAULT_VERIFIER,
            signer_address: None,
            records_path: None,
        }
    }
}

impl GatewayConfig {
    /// Configuration for a verifier with every other field defaulted
    pub fn for_verifier(verifier_address: Address) -> Self {
        Self {
            verifier_address,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;

        tracing::info!(
            "Loaded gateway config from {} (environment {}, verifier {})",
            path.display(),
            config.environment,
            config.verifier_address
        );

        Ok(config)
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject configurations the gateway cannot serve with
    pub fn validate(&self) -> Result<()> {
        if self.verifier_address == Address::ZERO {
            return Err(Error::Config("verifier_address must be set".to_string()));
        }
        Ok(())
    }
}
