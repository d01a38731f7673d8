use {
    crate::constants::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT, DEFAULT_RPC_URL, RPC_TIMEOUT_SECS},
    anyhow::{Context, Result},
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{collections::HashMap, fmt::Debug, fs, path::Path, str::FromStr, time::Duration},
    url::Url,
};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub eth_rpc: String,
    pub rpc_timeout_secs: u64,
}

impl Config {
    /// Build from `ETH_RPC` / `RPC_TIMEOUT_SECS`, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        load_env();
        let cfg = Self {
            eth_rpc: std::env::var("ETH_RPC").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            rpc_timeout_secs: *RPC_TIMEOUT_SECS,
        };
        cfg.rpc_url()?;
        Ok(cfg)
    }

    /// Read a `key=value` node config (`ethereum.conf` layout).  Recognised
    /// keys are `rpcconnect`, `rpcport`, `rpctls` and `rpctimeout`.
    pub fn from_conf_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = read_config_file(path)?;

        let host = settings
            .get("rpcconnect")
            .map(String::as_str)
            .unwrap_or(DEFAULT_RPC_HOST);
        let port: u16 = match settings.get("rpcport") {
            Some(p) => p
                .parse()
                .with_context(|| format!("rpcport `{p}` in {} is not a port", path.display()))?,
            None => *DEFAULT_RPC_PORT,
        };
        let tls = settings
            .get("rpctls")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let rpc_timeout_secs = match settings.get("rpctimeout") {
            Some(t) => t
                .parse()
                .with_context(|| format!("rpctimeout `{t}` in {} is not a number", path.display()))?,
            None => *RPC_TIMEOUT_SECS,
        };

        let scheme = if tls { "https" } else { "http" };
        let cfg = Self {
            eth_rpc: format!("{scheme}://{host}:{port}"),
            rpc_timeout_secs,
        };
        cfg.rpc_url()?;
        Ok(cfg)
    }

    pub fn rpc_url(&self) -> Result<Url> {
        Url::parse(&self.eth_rpc).with_context(|| format!("Failed to parse ETH_RPC: {}", self.eth_rpc))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

/// `=`-delimited settings file.  Blank lines, `#` comments and lines
/// without `=` are skipped; only the first `=` splits key from value.
pub fn read_config_file(path: &Path) -> Result<HashMap<String, String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_settings(&contents))
}

fn parse_settings(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn settings_skip_comments_and_bare_lines() {
        let map = parse_settings("# node\nrpcconnect=10.0.0.2\nnoequals\n\nblocknotify=a=b\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map["rpcconnect"], "10.0.0.2");
        assert_eq!(map["blocknotify"], "a=b");
    }

    #[test]
    fn conf_file_builds_rpc_url() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        writeln!(f, "rpcconnect=node.local")?;
        writeln!(f, "rpcport=9000")?;
        writeln!(f, "rpctls=true")?;
        writeln!(f, "rpctimeout=5")?;

        let cfg = Config::from_conf_file(f.path())?;
        assert_eq!(cfg.eth_rpc, "https://node.local:9000");
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn conf_file_defaults() -> Result<()> {
        let f = tempfile::NamedTempFile::new()?;
        let cfg = Config::from_conf_file(f.path())?;
        assert_eq!(cfg.eth_rpc, format!("http://127.0.0.1:{}", *DEFAULT_RPC_PORT));
        Ok(())
    }

    #[test]
    fn conf_file_rejects_bad_port() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        writeln!(f, "rpcport=eighty")?;
        assert!(Config::from_conf_file(f.path()).is_err());
        Ok(())
    }

    #[test]
    fn missing_conf_file_is_an_error() {
        assert!(Config::from_conf_file("/nonexistent/ethereum.conf").is_err());
    }

    #[test]
    fn get_var_t_falls_back() {
        let v: u64 = Config::get_var_t("ETHBOX_SURELY_UNSET_VAR", 7);
        assert_eq!(v, 7);
    }
}
