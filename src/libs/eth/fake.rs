//! In-memory node for tests.  Balances, submissions and the chain head are
//! plain data; every trait call bumps a counter so tests can assert that
//! validation failures never reached the node.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256, U64};

use super::api::EthApi;
use super::types::{TransferRequest, TxHash, TxRecord};
use crate::error::{ConsoleError, Result};

/// Deterministic test address `0x00..0n`.
pub fn addr(n: u8) -> Address {
    Address::with_last_byte(n)
}

#[derive(Default)]
struct State {
    accounts: Vec<(Address, U256)>,
    failing: Vec<Address>,
    reject: Option<String>,
    unindexed: bool,
    submitted: Vec<(TxHash, TransferRequest)>,
    records: HashMap<TxHash, TxRecord>,
    head: u64,
}

#[derive(Default)]
pub struct FakeNode {
    reachable: bool,
    calls: AtomicUsize,
    state: Mutex<State>,
}

impl FakeNode {
    pub fn with_accounts(accounts: Vec<(Address, U256)>) -> Self {
        Self {
            reachable: true,
            calls: AtomicUsize::new(0),
            state: Mutex::new(State {
                accounts,
                ..State::default()
            }),
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_balance_of(&self, address: Address) {
        self.state.lock().unwrap().failing.push(address);
    }

    pub fn reject_with(&self, reason: &str) {
        self.state.lock().unwrap().reject = Some(reason.to_string());
    }

    /// Accept submissions without making them visible to lookups.
    pub fn stop_indexing(&self) {
        self.state.lock().unwrap().unindexed = true;
    }

    pub fn submitted(&self) -> Vec<(TxHash, TransferRequest)> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn mine(&self, hash: TxHash, block: u64) {
        let mut st = self.state.lock().unwrap();
        if let Some(rec) = st.records.get_mut(&hash) {
            rec.block_hash = Some(keccak256(block.to_be_bytes()));
            rec.block_number = Some(U64::from(block));
            rec.transaction_index = Some(U64::ZERO);
        }
    }

    pub fn set_head(&self, head: u64) {
        self.state.lock().unwrap().head = head;
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reachable {
            Ok(())
        } else {
            Err(ConsoleError::ClientUnavailable(
                "connection refused (127.0.0.1:8545)".into(),
            ))
        }
    }
}

impl EthApi for FakeNode {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.enter()?;
        let st = self.state.lock().unwrap();
        Ok(st.accounts.iter().map(|(a, _)| *a).collect())
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.enter()?;
        let st = self.state.lock().unwrap();
        if st.failing.contains(&address) {
            return Err(ConsoleError::LookupFailed(format!("state unavailable for {address}")));
        }
        st.accounts
            .iter()
            .find(|(a, _)| *a == address)
            .map(|(_, b)| *b)
            .ok_or_else(|| ConsoleError::LookupFailed(format!("unknown account {address}")))
    }

    async fn send_transaction(&self, request: &TransferRequest) -> Result<TxHash> {
        self.enter()?;
        let mut st = self.state.lock().unwrap();
        if let Some(reason) = &st.reject {
            return Err(ConsoleError::SubmissionRejected(reason.clone()));
        }

        let nonce = st.submitted.len() as u64;
        let hash: B256 = keccak256([request.from.as_slice(), &nonce.to_be_bytes()[..]].concat());
        st.submitted.push((hash, *request));
        if !st.unindexed {
            st.records.insert(
                hash,
                TxRecord {
                    hash,
                    from: request.from,
                    to: Some(request.to),
                    value: request.value,
                    nonce: U64::from(nonce),
                    gas: U64::from(21_000u64),
                    gas_price: Some(U256::from(1_000_000_000u64)),
                    input: Bytes::new(),
                    block_hash: None,
                    block_number: None,
                    transaction_index: None,
                },
            );
        }
        Ok(hash)
    }

    async fn get_transaction(&self, hash: TxHash) -> Result<Option<TxRecord>> {
        self.enter()?;
        Ok(self.state.lock().unwrap().records.get(&hash).cloned())
    }

    async fn block_number(&self) -> Result<u64> {
        self.enter()?;
        Ok(self.state.lock().unwrap().head)
    }
}
