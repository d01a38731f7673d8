//! Console conveniences over an [`EthApi`] client: the balance report,
//! single balance lookup and the two transfer shortcuts.  Each helper is a
//! short sequence of client calls; errors from the client propagate as-is.
use std::io::Write;

use super::api::EthApi;
use super::types::{
    parse_address, parse_tx_hash, AccountBalance, BalanceReport, TransferRequest, TxHash, TxInfo,
    TxLookup,
};
use crate::error::{ConsoleError, Result};
use crate::libs::lookup::{lower_addr, save_log_to_file, short_addr};
use crate::libs::units::ether_to_f64;

/// Fetch every account balance, in the client's enumeration order.  Stops
/// at the first failing lookup.  The total sums the client's own ether
/// rendering so it always agrees with [`get_balance`].
pub async fn collect_balances<C: EthApi>(client: &C) -> Result<BalanceReport> {
    let addresses = client.accounts().await?;
    let mut accounts = Vec::with_capacity(addresses.len());
    let mut total_ether = 0f64;

    for (index, address) in addresses.into_iter().enumerate() {
        let wei = client.balance(address).await?;
        total_ether += ether_to_f64(&client.from_wei(wei))?;
        accounts.push(AccountBalance { index, address, wei });
    }

    Ok(BalanceReport {
        accounts,
        total_ether,
    })
}

/// Write one line per account and a closing total to `out`.
///
/// Every balance is fetched before the first line is written, so a failed
/// lookup leaves `out` untouched.
pub async fn check_all_balances<C: EthApi, W: Write>(
    client: &C,
    out: &mut W,
) -> Result<BalanceReport> {
    let report = collect_balances(client).await?;
    write_report(client, &report, out).map_err(|e| ConsoleError::Output(e.to_string()))?;
    save_log_to_file(&format!(
        "[spells] balance report: {} accounts, total {} ether",
        report.accounts.len(),
        report.total_ether
    ));
    Ok(report)
}

fn write_report<C: EthApi, W: Write>(
    client: &C,
    report: &BalanceReport,
    out: &mut W,
) -> std::io::Result<()> {
    for acct in &report.accounts {
        writeln!(
            out,
            "  eth.accounts[{}]: \t{} \tbalance: {} ether",
            acct.index,
            lower_addr(&acct.address),
            client.from_wei(acct.wei)
        )?;
    }
    writeln!(out, "  Total balance: {} ether", report.total_ether)
}

/// Balance of `address` in ether.
pub async fn get_balance<C: EthApi>(client: &C, address: &str) -> Result<String> {
    let address = parse_address(address)?;
    let wei = client.balance(address).await?;
    Ok(client.from_wei(wei))
}

/// `Account #<i>` labels paired with ether balances.
pub async fn list_accounts<C: EthApi>(client: &C) -> Result<Vec<(String, String)>> {
    let report = collect_balances(client).await?;
    Ok(report
        .accounts
        .iter()
        .map(|a| (a.label(), client.from_wei(a.wei)))
        .collect())
}

/// Submit a transfer of `value` ether and return the pending hash.  Does
/// not wait for the transaction to be mined.
pub async fn quick_send<C: EthApi>(client: &C, from: &str, to: &str, value: &str) -> Result<TxHash> {
    let from = parse_address(from)?;
    let to = parse_address(to)?;
    let value = client.to_wei(value)?;
    let request = TransferRequest::new(from, to, value);

    let hash = client.send_transaction(&request).await?;
    save_log_to_file(&format!(
        "[spells] sent {} wei {} -> {}: {hash}",
        request.value,
        short_addr(&from),
        short_addr(&to)
    ));
    Ok(hash)
}

/// [`quick_send`] followed by one lookup of the new hash.  The record may
/// still be pending; a miss comes back as [`TxLookup::NotFound`].
pub async fn send_and_print<C: EthApi>(
    client: &C,
    from: &str,
    to: &str,
    value: &str,
) -> Result<TxLookup> {
    let hash = quick_send(client, from, to, value).await?;
    let record = client.get_transaction(hash).await?;
    Ok(TxLookup::from_option(hash, record))
}

/// Look up `hash` and count confirmations against the current head.
pub async fn transaction_info<C: EthApi>(client: &C, hash: &str) -> Result<TxInfo> {
    let hash = parse_tx_hash(hash)?;
    let lookup = TxLookup::from_option(hash, client.get_transaction(hash).await?);

    let mined_at = lookup
        .record()
        .filter(|r| !r.is_pending())
        .and_then(|r| r.block_number);
    let confirmations = match mined_at {
        Some(block) => {
            let block: u64 = block.to();
            let head = client.block_number().await?;
            head.checked_sub(block).ok_or_else(|| {
                ConsoleError::LookupFailed(format!("head {head} is behind block {block}"))
            })?
        }
        None => 0,
    };

    Ok(TxInfo {
        lookup,
        confirmations,
    })
}
