//! Scripted chain for adapter tests

use crate::rpc::EthCall;
use crate::{Error, Result};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

enum Reply {
    Return(Bytes),
    Revert(String),
    Fail(String),
}

/// Answers `eth_call`s from a table keyed by target and calldata.
///
/// Calls with no entry revert without a reason, like a contract with no
/// matching function.
#[derive(Default)]
pub struct MockChain {
    replies: HashMap<(Address, Bytes), Reply>,
    calls: Mutex<Vec<(Address, Bytes)>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returns<C: SolCall>(mut self, to: Address, call: C, output: Vec<u8>) -> Self {
        self.replies
            .insert((to, call.abi_encode().into()), Reply::Return(output.into()));
        self
    }

    pub fn reverts<C: SolCall>(mut self, to: Address, call: C, reason: &str) -> Self {
        self.replies
            .insert((to, call.abi_encode().into()), Reply::Revert(reason.to_string()));
        self
    }

    pub fn fails<C: SolCall>(mut self, to: Address, call: C, message: &str) -> Self {
        self.replies
            .insert((to, call.abi_encode().into()), Reply::Fail(message.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl EthCall for MockChain {
    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.calls.lock().push((to, data.clone()));

        match self.replies.get(&(to, data)) {
            Some(Reply::Return(output)) => Ok(output.clone()),
            Some(Reply::Revert(reason)) => Err(Error::Reverted(reason.clone())),
            Some(Reply::Fail(message)) => Err(Error::Rpc(message.clone())),
            None => Err(Error::Reverted("execution reverted".to_string())),
        }
    }
}
