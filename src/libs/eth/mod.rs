//! Ethereum node access.  [`api::EthApi`] is the seam every helper is
//! written against, [`client::RpcClient`] the JSON-RPC implementation of
//! it, and [`spells`] the console conveniences built on top.
pub mod api;
pub mod client;
pub mod spells;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use api::EthApi;
pub use client::RpcClient;
pub use types::{TransferRequest, TxHash, TxLookup, TxRecord};
