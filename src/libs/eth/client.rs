//! The [`RpcClient`] type encapsulates a connection to an Ethereum
//! node and implements [`EthApi`] over plain JSON-RPC using `reqwest`.
//! Alloy is only used for primitive types.
use std::time::Duration;

use alloy::primitives::{Address, U256};
use anyhow::Context;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use url::Url;

use super::api::EthApi;
use super::types::{parse_tx_hash, TransferRequest, TxHash, TxRecord};
use crate::constants::LATEST;
use crate::error::{ConsoleError, Result};
use crate::libs::config::Config;
use crate::libs::lookup::save_log_to_file;
use crate::libs::units::parse_quantity;

/// Why a single JSON-RPC exchange failed.  Call sites decide which
/// [`ConsoleError`] a node-side failure becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RpcFailure {
    /// Nothing usable came back: connect error, timeout, non-JSON body.
    Transport(String),
    /// The node answered with a JSON-RPC `error` object.
    Node(String),
}

impl RpcFailure {
    fn lookup(self) -> ConsoleError {
        match self {
            Self::Transport(m) => ConsoleError::ClientUnavailable(m),
            Self::Node(m) => ConsoleError::LookupFailed(m),
        }
    }

    fn submission(self) -> ConsoleError {
        match self {
            Self::Transport(m) => ConsoleError::ClientUnavailable(m),
            Self::Node(m) => ConsoleError::SubmissionRejected(m),
        }
    }
}

/// JSON-RPC over HTTP.  Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct RpcClient {
    rpc_url: Url,
    http: HttpClient,
}

impl RpcClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = Url::parse(rpc_url).with_context(|| format!("Failed to parse ETH_RPC: {rpc_url}"))?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { rpc_url: url, http })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(&cfg.eth_rpc, cfg.timeout())
    }

    pub fn url(&self) -> &Url {
        &self.rpc_url
    }

    async fn rpc(&self, method: &str, params: Value) -> std::result::Result<Value, RpcFailure> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        save_log_to_file(&format!("[rpc] -> {method} {params}"));

        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcFailure::Transport(format!("{method}: {e} ({})", self.rpc_url)))?;
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| RpcFailure::Transport(format!("{method}: {e}")))?;

        let out = decode_reply(&bytes, status, &self.rpc_url);
        if let Err(failure) = &out {
            save_log_to_file(&format!("[rpc] <- {method} failed: {failure:?}"));
        }
        out
    }
}

/// Pull `result` out of a JSON-RPC reply body.
fn decode_reply(
    bytes: &[u8],
    status: StatusCode,
    endpoint: &Url,
) -> std::result::Result<Value, RpcFailure> {
    let v: Value = match serde_json::from_slice(bytes) {
        Ok(json) => json,
        Err(e) => {
            let mut sample = String::from_utf8_lossy(bytes).to_string();
            if sample.len() > 512 {
                let mut cut = 512;
                while !sample.is_char_boundary(cut) {
                    cut -= 1;
                }
                sample.truncate(cut);
            }
            let hint = if sample.trim_start().starts_with('<') {
                "Response looks like HTML; ETH_RPC may point at a gateway page rather than a JSON-RPC endpoint."
            } else if sample.trim().is_empty() {
                "Empty body from RPC. Endpoint may be down or require authentication."
            } else {
                "Non-JSON response from RPC."
            };
            return Err(RpcFailure::Transport(format!(
                "RPC decode error ({status}): {e}. {hint} Endpoint: {endpoint} Sample: {sample}"
            )));
        }
    };
    if let Some(err) = v.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(RpcFailure::Node(message));
    }
    if !status.is_success() {
        return Err(RpcFailure::Transport(format!(
            "RPC replied {status} without a JSON-RPC error. Endpoint: {endpoint} Body: {v}"
        )));
    }
    // an explicit `"result": null` is a real answer, a missing key is not
    v.get("result").cloned().ok_or_else(|| {
        RpcFailure::Transport(format!("RPC reply has no `result`. Endpoint: {endpoint} Body: {v}"))
    })
}

fn quantity_from(value: &Value, what: &str) -> Result<U256> {
    match value {
        Value::String(s) => parse_quantity(s)
            .map_err(|_| ConsoleError::LookupFailed(format!("{what}: bad quantity `{s}`"))),
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| ConsoleError::LookupFailed(format!("{what}: bad quantity {n}"))),
        other => Err(ConsoleError::LookupFailed(format!(
            "{what}: unexpected reply {other}"
        ))),
    }
}

impl EthApi for RpcClient {
    async fn accounts(&self) -> Result<Vec<Address>> {
        let res = self
            .rpc("eth_accounts", serde_json::json!([]))
            .await
            .map_err(RpcFailure::lookup)?;
        if res.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(res)
            .map_err(|e| ConsoleError::LookupFailed(format!("eth_accounts: {e}")))
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        let res = self
            .rpc("eth_getBalance", serde_json::json!([address, LATEST]))
            .await
            .map_err(RpcFailure::lookup)?;
        quantity_from(&res, "eth_getBalance")
    }

    async fn send_transaction(&self, request: &TransferRequest) -> Result<TxHash> {
        let res = self
            .rpc("eth_sendTransaction", serde_json::json!([request]))
            .await
            .map_err(RpcFailure::submission)?;
        let hash = res.as_str().ok_or_else(|| {
            ConsoleError::SubmissionRejected(format!("eth_sendTransaction: unexpected reply {res}"))
        })?;
        parse_tx_hash(hash).map_err(|_| {
            ConsoleError::SubmissionRejected(format!("eth_sendTransaction: bad hash `{hash}`"))
        })
    }

    async fn get_transaction(&self, hash: TxHash) -> Result<Option<TxRecord>> {
        let res = self
            .rpc("eth_getTransactionByHash", serde_json::json!([hash]))
            .await
            .map_err(RpcFailure::lookup)?;
        if res.is_null() {
            return Ok(None);
        }
        serde_json::from_value(res)
            .map(Some)
            .map_err(|e| ConsoleError::LookupFailed(format!("eth_getTransactionByHash: {e}")))
    }

    async fn block_number(&self) -> Result<u64> {
        let res = self
            .rpc("eth_blockNumber", serde_json::json!([]))
            .await
            .map_err(RpcFailure::lookup)?;
        let n = quantity_from(&res, "eth_blockNumber")?;
        n.try_into()
            .map_err(|_| ConsoleError::LookupFailed(format!("eth_blockNumber: {n} out of range")))
    }
}
