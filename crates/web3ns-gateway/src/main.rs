//! Web3NS gateway server
//!
//! Serves the CCIP-Read gateway and the plain lookup API over HTTP.

use alloy_primitives::Address;
use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use web3ns_ccip::{CcipGateway, GatewayConfig, MemoryNameStore, NameDataStore, ResolverKey, ResponseSigner};
use web3ns_gateway::{build_router, records, AppState};
use web3ns_lookup::{AddressLookup, E164NameStore, EthRpcClient, LookupCache, LookupRouter, MemoryKvStore};
use web3ns_params::{Environment, ProviderConfig};

#[derive(Parser)]
#[command(name = "web3ns-gateway")]
#[command(about = "Web3NS name lookup and CCIP-Read gateway", long_about = None)]
struct Cli {
    /// Gateway config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Trusted verifier contract, overriding the config file
    #[arg(long)]
    verifier: Option<Address>,

    /// Deployment environment (prd or stg), overriding the config file
    #[arg(long)]
    environment: Option<Environment>,

    /// Static name records (JSON), overriding the config file
    #[arg(long)]
    records: Option<PathBuf>,

    /// Resolver signing key (hex)
    #[arg(long, env = "WEB3NS_RESOLVER_KEY", hide_env_values = true)]
    resolver_key: Option<String>,

    /// Provider API key for chain lookups
    #[arg(long, env = "WEB3NS_PROVIDER_API_KEY", hide_env_values = true)]
    provider_api_key: Option<String>,

    /// Sign with a throwaway key (local development only)
    #[arg(long)]
    dev_key: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<GatewayConfig> {
    let mut config = match &cli.config {
        Some(path) => GatewayConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GatewayConfig::default(),
    };

    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(verifier) = cli.verifier {
        config.verifier_address = verifier;
    }
    if let Some(environment) = cli.environment {
        config.environment = environment;
    }
    if let Some(records) = &cli.records {
        config.records_path = Some(records.clone());
    }

    config.validate()?;
    Ok(config)
}

fn resolver_key(cli: &Cli) -> anyhow::Result<ResolverKey> {
    match (&cli.resolver_key, cli.dev_key) {
        (Some(key), _) => Ok(ResolverKey::from_hex(key)?),
        (None, true) => {
            warn!("Signing with a throwaway key; verifiers will reject these answers");
            Ok(ResolverKey::random())
        }
        (None, false) => anyhow::bail!("WEB3NS_RESOLVER_KEY is not set (use --dev-key for local runs)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = load_config(&cli)?;
    let signer = ResponseSigner::new(&resolver_key(&cli)?)?;

    let providers = match cli.provider_api_key.as_deref() {
        Some(api_key) => Some(ProviderConfig::new(config.environment, api_key)?),
        None => {
            warn!("No provider API key; chain lookups are disabled");
            None
        }
    };
    let http = reqwest::Client::new();

    let store: Arc<dyn NameDataStore> = match (&config.records_path, &providers) {
        (Some(path), _) => Arc::new(records::load_records(path)?),
        (None, Some(providers)) => {
            info!("Serving CCIP answers from 3NUM ownership on {}", providers.eth_chain.name);
            Arc::new(E164NameStore::new(Arc::new(EthRpcClient::with_client(
                providers.eth_api.clone(),
                http.clone(),
            ))))
        }
        (None, None) => {
            warn!("No records file or provider; every name resolves empty");
            Arc::new(MemoryNameStore::new())
        }
    };

    let gateway = CcipGateway::new(&config, signer, store)?;
    let mut state = AppState::new(gateway);

    if let Some(providers) = &providers {
        let cache = LookupCache::new(Arc::new(MemoryKvStore::new()));
        state = state.with_lookups(
            LookupRouter::from_providers(providers, http.clone(), cache.clone()),
            AddressLookup::from_providers(providers, http, cache),
        );
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!("Listening on {} ({})", config.listen_addr, config.environment);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
