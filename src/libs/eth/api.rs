use alloy::primitives::{Address, U256};

use super::types::{TransferRequest, TxHash, TxRecord};
use crate::error::Result;
use crate::libs::units;

/// The node capabilities the console helpers are written against.  Every
/// helper in [`super::spells`] takes one of these explicitly; nothing is
/// read from a global handle.
///
/// Implementations report transport problems as
/// [`ConsoleError::ClientUnavailable`](crate::error::ConsoleError::ClientUnavailable)
/// and pass node-side reasons through untouched.
#[allow(async_fn_in_trait)]
pub trait EthApi {
    /// Accounts the node manages, in the node's own order.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Latest balance in wei.
    async fn balance(&self, address: Address) -> Result<U256>;

    async fn send_transaction(&self, request: &TransferRequest) -> Result<TxHash>;

    /// `Ok(None)` when the node does not know the hash (yet).
    async fn get_transaction(&self, hash: TxHash) -> Result<Option<TxRecord>>;

    async fn block_number(&self) -> Result<u64>;

    fn from_wei(&self, amount: U256) -> String {
        units::from_wei(amount)
    }

    fn to_wei(&self, amount: &str) -> Result<U256> {
        units::to_wei(amount)
    }
}
