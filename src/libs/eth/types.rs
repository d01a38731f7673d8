use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};
use crate::libs::units::from_wei;

pub type TxHash = B256;

/// Parse a user supplied address.  All-lowercase and all-uppercase hex are
/// taken as-is; mixed case must be a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address> {
    let invalid = || ConsoleError::InvalidAddress(raw.to_string());
    let s = raw.trim();
    let hex_part = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if hex_part.len() != 40 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{hex_part}"), None).map_err(|_| invalid());
    }
    hex_part.parse::<Address>().map_err(|_| invalid())
}

pub fn parse_tx_hash(raw: &str) -> Result<TxHash> {
    let s = raw.trim();
    let hex_part = s
        .strip_prefix("0x")
        .ok_or_else(|| ConsoleError::InvalidHash(raw.to_string()))?;
    if hex_part.len() != 64 {
        return Err(ConsoleError::InvalidHash(raw.to_string()));
    }
    hex_part
        .parse::<TxHash>()
        .map_err(|_| ConsoleError::InvalidHash(raw.to_string()))
}

/// A plain value transfer, as handed to `eth_sendTransaction`.  The node
/// fills in nonce, gas and fees and signs with its unlocked `from` account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
}

impl TransferRequest {
    pub fn new(from: Address, to: Address, value: U256) -> Self {
        Self { from, to, value }
    }
}

/// Transaction as reported by `eth_getTransactionByHash`.  Block fields
/// are absent while the transaction is still in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRecord {
    pub hash: TxHash,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    pub value: U256,
    #[serde(default)]
    pub nonce: U64,
    #[serde(default)]
    pub gas: U64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub input: Bytes,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
}

impl TxRecord {
    pub fn is_pending(&self) -> bool {
        self.block_hash.is_none()
    }

    pub fn value_ether(&self) -> String {
        from_wei(self.value)
    }

    /// True when the record describes the given transfer.
    pub fn matches(&self, req: &TransferRequest) -> bool {
        self.from == req.from && self.to == Some(req.to) && self.value == req.value
    }
}

/// Outcome of a single transaction lookup.  A miss is expected right after
/// submission when the node has not indexed the hash yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxLookup {
    Found(TxRecord),
    NotFound(TxHash),
}

impl TxLookup {
    pub fn from_option(hash: TxHash, record: Option<TxRecord>) -> Self {
        match record {
            Some(r) => Self::Found(r),
            None => Self::NotFound(hash),
        }
    }

    pub fn record(&self) -> Option<&TxRecord> {
        match self {
            Self::Found(r) => Some(r),
            Self::NotFound(_) => None,
        }
    }

    pub fn hash(&self) -> TxHash {
        match self {
            Self::Found(r) => r.hash,
            Self::NotFound(h) => *h,
        }
    }
}

/// One line of the balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub index: usize,
    pub address: Address,
    pub wei: U256,
}

impl AccountBalance {
    pub fn label(&self) -> String {
        format!("Account #{}", self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub accounts: Vec<AccountBalance>,
    /// Sum of the per-account ether values as f64.  Display only.
    pub total_ether: f64,
}

/// Transaction lookup enriched with a confirmation count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInfo {
    pub lookup: TxLookup,
    pub confirmations: u64,
}
