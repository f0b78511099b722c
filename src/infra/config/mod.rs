use {
    crate::{
        domain::{dispatch, intent::Tokens, tron},
        infra::node::trongrid,
    },
    std::time::Duration,
};

mod file;

pub use self::file::load;

pub struct Config {
    pub network: tron::Network,
    pub node: trongrid::Config,
    pub wallet: Wallet,
    pub dispatch: dispatch::Config,
    pub tokens: Tokens,
}

pub struct Wallet {
    pub kind: WalletKind,
    /// URL of the JSON-RPC bridge to the user's wallet.
    pub endpoint: reqwest::Url,
    pub timeout: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletKind {
    Injected,
    WalletConnect,
}
