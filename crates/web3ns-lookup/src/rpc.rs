//! JSON-RPC `eth_call` client

use crate::{Error, Result};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read-only contract call capability
#[async_trait]
pub trait EthCall: Send + Sync {
    /// Execute `data` against `to` at the latest block and return the raw
    /// return data
    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}

/// Encode `call`, execute it against `to` and decode its return value
pub(crate) async fn call_contract<C: SolCall>(
    client: &dyn EthCall,
    to: Address,
    call: C,
) -> Result<C::Return> {
    let data = Bytes::from(call.abi_encode());
    let output = client.eth_call(to, data).await?;

    C::abi_decode_returns(&output).map_err(|e| {
        Error::Decode(format!("{} returned malformed data: {}", C::SIGNATURE, e))
    })
}

/// `eth_call` over HTTP JSON-RPC
pub struct EthRpcClient {
    endpoint: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl EthRpcClient {
    /// Create a client for a provider URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a client sharing an existing HTTP client
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
            next_id: AtomicU64::new(1),
        }
    }
}

impl fmt::Debug for EthRpcClient {
    // The endpoint carries the provider API key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthRpcClient").finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CallRequest {
    to: Address,
    data: Bytes,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallRequest, &'a str),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Bytes>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl From<RpcError> for Error {
    fn from(error: RpcError) -> Self {
        // Geth reports reverts as code 3; other nodes only say so in the message.
        let reverted = error.code == 3 || error.message.to_lowercase().contains("revert");
        if !reverted {
            return Error::Rpc(format!("{} (code {})", error.message, error.code));
        }

        match error.data {
            Some(serde_json::Value::String(data)) => {
                Error::Reverted(format!("{} {}", error.message, data))
            }
            _ => Error::Reverted(error.message),
        }
    }
}

fn parse_response(response: RpcResponse) -> Result<Bytes> {
    if let Some(error) = response.error {
        return Err(error.into());
    }
    response
        .result
        .ok_or_else(|| Error::Rpc("Response has neither result nor error".to_string()))
}

#[async_trait]
impl EthCall for EthRpcClient {
    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: "eth_call",
            params: (CallRequest { to, data }, "latest"),
        };

        tracing::trace!("eth_call to {}", to);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Rpc(format!("HTTP error: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(Error::Rpc(format!("HTTP error: {}", response.status())));
        }

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::Rpc(format!("JSON decode error: {}", e.without_url())))?;

        parse_response(response)
    }
}
