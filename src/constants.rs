#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub RPC_TIMEOUT_SECS: u64 = ("RPC_TIMEOUT_SECS", 60);
    pub DEFAULT_RPC_PORT: u16 = ("ETH_RPC_PORT", 8545);
}

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Decimal places of the display unit (1 ether = 10^18 wei).
pub const ETHER_DECIMALS: u8 = 18;
pub const GWEI_DECIMALS: u8 = 9;
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Block tag used for balance queries.
pub const LATEST: &str = "latest";
