use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ethbox")]
#[command(about = "Balance and transfer shortcuts for an Ethereum node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON-RPC endpoint; overrides ETH_RPC and --conf
    #[arg(long, value_name = "URL")]
    pub rpc: Option<String>,

    /// Node config file with rpcconnect / rpcport / rpctls keys
    #[arg(long, value_name = "FILE")]
    pub conf: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every account balance and the total
    Balances,
    /// Labelled account balances
    Accounts,
    /// Balance of one address in ether
    Balance {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Send ether and print the transaction hash
    Send {
        from: String,
        to: String,
        /// Amount in ether
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Send ether and print the node's record of the transaction
    SendAndPrint {
        from: String,
        to: String,
        /// Amount in ether
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Look up a transaction and its confirmations
    Tx {
        #[arg(value_name = "HASH")]
        hash: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_and_print() {
        let cli = Cli::try_parse_from([
            "ethbox",
            "--rpc",
            "http://node:8545",
            "send-and-print",
            "0xf5041fe398062cd63b62bd9b5df9942d30c9b8ca",
            "0x85521e2663efd02fef594a9b90b0dbe3aec590ac",
            "0.5",
        ])
        .unwrap();
        assert_eq!(cli.rpc.as_deref(), Some("http://node:8545"));
        match cli.command {
            Command::SendAndPrint { value, .. } => assert_eq!(value, "0.5"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn balance_requires_address() {
        assert!(Cli::try_parse_from(["ethbox", "balance"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
