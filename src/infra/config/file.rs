use {
    crate::{
        domain::{
            dispatch,
            intent::{Decimals, Token, Tokens},
            tron::{self, Sun},
        },
        infra::node::trongrid,
    },
    serde::Deserialize,
    serde_with::serde_as,
    std::{path::Path, time::Duration},
    tokio::fs,
};

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// The network to operate on.
    #[serde(default)]
    #[serde_as(as = "serde_with::DisplayFromStr")]
    network: tron::Network,

    /// The full node to build and broadcast transactions with. Defaults to
    /// the network's public TronGrid endpoint.
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    node_url: Option<reqwest::Url>,

    /// TronGrid API key.
    api_key: Option<String>,

    /// The fee limit for contract triggers, in sun.
    #[serde(default = "default_fee_limit")]
    fee_limit: u64,

    /// Whether to check the sender's balance before building a native
    /// transfer.
    #[serde(default = "default_check_balance")]
    check_balance: bool,

    /// Timeout for every request to the node and the wallet bridge.
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    request_timeout: Duration,

    wallet: WalletConfig,

    /// Replaces the built-in token registry.
    tokens: Option<Vec<TokenConfig>>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct WalletConfig {
    kind: WalletKind,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    endpoint: reqwest::Url,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum WalletKind {
    Injected,
    WalletConnect,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TokenConfig {
    symbol: String,
    contract: tron::Address,
    decimals: u32,
}

fn default_fee_limit() -> u64 {
    50_000_000
}

fn default_check_balance() -> bool {
    true
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Load the gateway configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> super::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    let config = toml::de::from_str::<Config>(&data)
        .unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e:?}"));

    let endpoint = config.node_url.unwrap_or_else(|| {
        config
            .network
            .default_endpoint()
            .parse()
            .expect("valid default node endpoint")
    });
    let fee_limit = Sun::new(config.fee_limit)
        .unwrap_or_else(|| panic!("fee limit {} out of range in {path:?}", config.fee_limit));
    let tokens = match config.tokens {
        Some(tokens) => Tokens(
            tokens
                .into_iter()
                .map(|token| Token {
                    decimals: Decimals::new(token.decimals).unwrap_or_else(|e| {
                        panic!("token {} in {path:?}: {e}", token.symbol)
                    }),
                    symbol: token.symbol,
                    contract: token.contract,
                })
                .collect(),
        ),
        None if config.network == tron::Network::Mainnet => Tokens::mainnet(),
        None => Tokens::default(),
    };

    super::Config {
        network: config.network,
        node: trongrid::Config {
            endpoint,
            api_key: config.api_key,
            timeout: config.request_timeout,
        },
        wallet: super::Wallet {
            kind: match config.wallet.kind {
                WalletKind::Injected => super::WalletKind::Injected,
                WalletKind::WalletConnect => super::WalletKind::WalletConnect,
            },
            endpoint: config.wallet.endpoint,
            timeout: config.request_timeout,
        },
        dispatch: dispatch::Config {
            fee_limit,
            check_balance: config.check_balance,
        },
        tokens,
    }
}
