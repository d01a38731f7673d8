use {
    crate::app::cli::{Cli, Command},
    crate::libs::config::{load_env, Config},
    crate::libs::eth::{
        spells::{
            check_all_balances, get_balance, list_accounts, quick_send, send_and_print,
            transaction_info,
        },
        EthApi, RpcClient, TxLookup,
    },
    crate::libs::units::{ether_to_gwei, from_wei},
    crate::libs::writing::cc,
    crate::log,
    anyhow::{bail, Context, Result},
    clap::Parser,
    std::io::Write,
};

pub async fn init() -> Result<()> {
    load_env();
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    let client = RpcClient::from_config(&cfg)?;
    log!(cc::LIGHT_GRAY, "node: {}", client.url());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&client, cli.command, &mut out).await
}

/// `--conf` file, else the environment; `--rpc` and `--timeout` win over both.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.conf {
        Some(path) => Config::from_conf_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(rpc) = &cli.rpc {
        cfg.eth_rpc = rpc.clone();
        cfg.rpc_url()?;
    }
    if let Some(secs) = cli.timeout {
        cfg.rpc_timeout_secs = secs;
    }
    Ok(cfg)
}

pub async fn run<C: EthApi, W: Write>(client: &C, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Balances => {
            check_all_balances(client, out).await?;
        }
        Command::Accounts => {
            for (label, ether) in list_accounts(client).await? {
                writeln!(out, "{label}: {ether} ether")?;
            }
        }
        Command::Balance { address } => {
            let ether = get_balance(client, &address).await?;
            writeln!(out, "{ether}")?;
        }
        Command::Send { from, to, value } => {
            let hash = quick_send(client, &from, &to, &value).await?;
            log!(cc::LIGHT_GREEN, "submitted {} ether {} -> {}", value, from, to);
            writeln!(out, "{hash}")?;
        }
        Command::SendAndPrint { from, to, value } => {
            match send_and_print(client, &from, &to, &value).await? {
                TxLookup::Found(record) => {
                    let json = serde_json::to_string_pretty(&record)
                        .context("Failed to encode transaction record")?;
                    writeln!(out, "{json}")?;
                }
                TxLookup::NotFound(hash) => {
                    crate::warn!("transaction {hash} submitted but not indexed by the node yet");
                    writeln!(out, "{hash}")?;
                }
            }
        }
        Command::Tx { hash } => {
            let info = transaction_info(client, &hash).await?;
            let TxLookup::Found(record) = &info.lookup else {
                bail!("transaction {hash} not found");
            };
            let json = serde_json::to_string_pretty(record)
                .context("Failed to encode transaction record")?;
            writeln!(out, "{json}")?;
            writeln!(out, "value: {} ether", record.value_ether())?;
            if let Some(price) = record.gas_price {
                writeln!(out, "gas price: {} gwei", ether_to_gwei(&from_wei(price))?)?;
            }
            if record.is_pending() {
                writeln!(out, "status: pending")?;
            } else {
                writeln!(out, "confirmations: {}", info.confirmations)?;
            }
        }
    }
    Ok(())
}
