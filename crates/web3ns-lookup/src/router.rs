//! Suffix routing for the plain lookup API

use crate::cache::LookupCache;
use crate::e164::E164Lookup;
use crate::ens::EnsLookup;
use crate::farcaster::FarcasterLookup;
use crate::lens::LensLookup;
use crate::lookup::{LookupData, NameLookup};
use crate::rpc::EthRpcClient;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;
use web3ns_params::{ProviderConfig, SUPPORTED_EXTENSIONS};

/// Adapter a name is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `.eth`
    Ens,
    /// `.avax`
    Avax,
    /// `.lens`
    Lens,
    /// Leading `+`
    E164,
    /// Anything else
    Farcaster,
}

impl Route {
    /// Pick the adapter for a name by its last label
    pub fn for_name(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidName("empty name".to_string()));
        }

        Ok(match name.rsplit('.').next() {
            Some("eth") => Route::Ens,
            Some("avax") => Route::Avax,
            Some("lens") => Route::Lens,
            _ if name.starts_with('+') => Route::E164,
            _ => Route::Farcaster,
        })
    }
}

/// Routes names to adapters behind the lookup cache
pub struct LookupRouter {
    ens: Arc<dyn NameLookup>,
    avax: Option<Arc<dyn NameLookup>>,
    lens: Arc<dyn NameLookup>,
    e164: Arc<dyn NameLookup>,
    farcaster: Arc<dyn NameLookup>,
    cache: LookupCache,
}

impl LookupRouter {
    /// Create a router from individual adapters; `.avax` stays unsupported
    /// until [`with_avax`](Self::with_avax) is called
    pub fn new(
        ens: Arc<dyn NameLookup>,
        lens: Arc<dyn NameLookup>,
        e164: Arc<dyn NameLookup>,
        farcaster: Arc<dyn NameLookup>,
        cache: LookupCache,
    ) -> Self {
        Self {
            ens,
            avax: None,
            lens,
            e164,
            farcaster,
            cache,
        }
    }

    /// Create the RPC-backed adapters for a provider table
    pub fn from_providers(
        providers: &ProviderConfig,
        http: reqwest::Client,
        cache: LookupCache,
    ) -> Self {
        let eth = Arc::new(EthRpcClient::with_client(providers.eth_api.clone(), http.clone()));
        let polygon = Arc::new(EthRpcClient::with_client(providers.polygon_api.clone(), http.clone()));
        let farcaster = Arc::new(EthRpcClient::with_client(providers.farcaster_api.clone(), http));

        Self::new(
            Arc::new(EnsLookup::new(eth.clone())),
            Arc::new(LensLookup::new(polygon)),
            Arc::new(E164Lookup::new(eth)),
            Arc::new(FarcasterLookup::new(farcaster)),
            cache,
        )
    }

    /// Serve `.avax` names with `avax`
    pub fn with_avax(mut self, avax: Arc<dyn NameLookup>) -> Self {
        self.avax = Some(avax);
        self
    }

    /// Name suffixes advertised to clients
    pub fn supported_extensions() -> &'static [&'static str] {
        &SUPPORTED_EXTENSIONS
    }

    fn adapter(&self, route: Route) -> Result<&Arc<dyn NameLookup>> {
        match route {
            Route::Ens => Ok(&self.ens),
            Route::Avax => self
                .avax
                .as_ref()
                .ok_or_else(|| Error::Unsupported("Avvy lookups are not configured".to_string())),
            Route::Lens => Ok(&self.lens),
            Route::E164 => Ok(&self.e164),
            Route::Farcaster => Ok(&self.farcaster),
        }
    }

    /// Look up a name through its adapter, served from cache when fresh
    pub async fn lookup(&self, name: &str) -> Result<LookupData> {
        let route = Route::for_name(name)?;
        let adapter = self.adapter(route)?;

        debug!("Routing {} to {:?}", name, route);
        self.cache.execute(name, adapter.lookup(name)).await
    }
}
