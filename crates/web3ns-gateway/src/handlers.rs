//! Route handlers

use crate::{ApiError, AppState};
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use web3ns_ccip::GatewayResponse;
use web3ns_lookup::{AddressLookup, AddressLookupData, LookupData, LookupRouter};

/// EIP-3668 POST body
#[derive(Debug, Deserialize)]
pub struct CcipPostBody {
    /// Verifier contract
    pub sender: String,
    /// Outer calldata
    pub data: String,
}

/// Health probe body
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    /// Always `ok`
    pub status: String,
    /// Address response signatures recover to
    pub signer: String,
}

/// `GET /r/{sender}/{callData}`; the calldata may carry a `.json` suffix
pub async fn ccip_get(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<GatewayResponse>, ApiError> {
    let Path((sender, call_data)) = path.map_err(|_| invalid_sender_or_call_data())?;
    let call_data = call_data.strip_suffix(".json").unwrap_or(&call_data);
    let response = state.gateway().handle(&sender, call_data).await?;
    Ok(Json(response))
}

/// `POST /r` with `{"sender": …, "data": …}`
pub async fn ccip_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GatewayResponse>, ApiError> {
    let body: CcipPostBody =
        serde_json::from_slice(&body).map_err(|_| invalid_sender_or_call_data())?;

    let response = state.gateway().handle(&body.sender, &body.data).await?;
    Ok(Json(response))
}

/// `GET /api/v1/extensions`
pub async fn extensions() -> Json<&'static [&'static str]> {
    Json(LookupRouter::supported_extensions())
}

/// `GET /api/v1/lookup/{name}`
pub async fn lookup_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<LookupData>, ApiError> {
    let Path(name) = path.map_err(|e| web3ns_lookup::Error::InvalidName(e.body_text()))?;
    let lookups = state.lookups().ok_or_else(lookups_disabled)?;
    Ok(Json(lookups.lookup(&name).await?))
}

/// `GET /api/v1/address/{address}`
pub async fn lookup_address(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<AddressLookupData>, ApiError> {
    let Path(address) = path.map_err(|e| web3ns_lookup::Error::InvalidName(e.body_text()))?;
    let addresses = state.addresses().ok_or_else(lookups_disabled)?;
    let address = AddressLookup::parse_address(&address)?;
    Ok(Json(addresses.lookup(address).await?))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        signer: state.gateway().signer_address().to_checksum(None),
    })
}

fn invalid_sender_or_call_data() -> web3ns_ccip::Error {
    web3ns_ccip::Error::InvalidRequest("Invalid sender or callData".to_string())
}

fn lookups_disabled() -> web3ns_lookup::Error {
    web3ns_lookup::Error::Unsupported("Lookup providers are not configured".to_string())
}
