//! HTTP surface of the Web3NS gateway
//!
//! ```text
//! /
//! ├── GET  /r/{sender}/{callData}[.json]   CCIP-Read gateway
//! ├── POST /r                              CCIP-Read gateway (JSON body)
//! ├── GET  /api/v1/extensions              supported name suffixes
//! ├── GET  /api/v1/lookup/{name}           name → address
//! ├── GET  /api/v1/address/{address}       address → names
//! └── GET  /health
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod records;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use web3ns_ccip::CcipGateway;
use web3ns_lookup::{AddressLookup, LookupRouter};

/// Shared request state
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<CcipGateway>,
    lookups: Option<Arc<LookupRouter>>,
    addresses: Option<Arc<AddressLookup>>,
}

impl AppState {
    /// State serving only the CCIP surface
    pub fn new(gateway: CcipGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            lookups: None,
            addresses: None,
        }
    }

    /// Serve the plain lookup API
    pub fn with_lookups(mut self, lookups: LookupRouter, addresses: AddressLookup) -> Self {
        self.lookups = Some(Arc::new(lookups));
        self.addresses = Some(Arc::new(addresses));
        self
    }

    /// CCIP gateway
    pub fn gateway(&self) -> &CcipGateway {
        &self.gateway
    }

    /// Name lookups, when configured
    pub fn lookups(&self) -> Option<&LookupRouter> {
        self.lookups.as_deref()
    }

    /// Address lookups, when configured
    pub fn addresses(&self) -> Option<&AddressLookup> {
        self.addresses.as_deref()
    }
}

/// Build the router for both surfaces
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/r", post(handlers::ccip_post))
        .route("/r/{sender}/{call_data}", get(handlers::ccip_get))
        .nest("/api/v1", lookup_api_router())
        .route("/health", get(handlers::health))
        .with_state(state)
}

fn lookup_api_router() -> Router<AppState> {
    Router::new()
        .route("/extensions", get(handlers::extensions))
        .route("/lookup/{name}", get(handlers::lookup_name))
        .route("/address/{address}", get(handlers::lookup_address))
}
