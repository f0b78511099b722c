use {
    crate::{
        domain::{
            transaction::{Receipt, SignedTransaction, Transaction},
            tron,
        },
        infra::config,
        util,
    },
    std::sync::Arc,
};

pub mod injected;
mod rpc;
pub mod walletconnect;

pub use self::{injected::Injected, walletconnect::WalletConnect};

/// The user's wallet. Every method may prompt the user, who may decline.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    /// The account the wallet is currently connected with.
    async fn account(&self) -> Result<tron::Address, Error>;

    /// Signs an arbitrary UTF-8 message and returns the hex signature.
    async fn sign_message(&self, message: &str) -> Result<String, Error>;

    async fn sign_transaction(&self, transaction: &Transaction)
    -> Result<SignedTransaction, Error>;

    /// Signs and broadcasts in one step. The wallet's answer is translated
    /// into the node's receipt shape.
    async fn sign_and_send_transaction(&self, transaction: &Transaction) -> Result<Receipt, Error>;

    async fn disconnect(&self) -> Result<(), Error>;
}

/// Connects to the configured wallet bridge.
pub fn try_new(config: config::Wallet) -> Result<Arc<dyn Wallet>, reqwest::Error> {
    let rpc = rpc::Client::try_new(config.endpoint, config.timeout)?;
    Ok(match config.kind {
        config::WalletKind::Injected => Arc::new(Injected::new(rpc)),
        config::WalletKind::WalletConnect => Arc::new(WalletConnect::new(rpc)),
    })
}

/// The wallet did not do what it was asked to.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("user cancelled: {0}")]
    UserCancelled(String),
    #[error("wallet error: {0}")]
    Failed(String),
    #[error("unexpected wallet response: {0}")]
    UnexpectedResponse(String),
    #[error(transparent)]
    Http(#[from] util::http::Error),
}

impl Error {
    /// Classifies a wallet reported error. The wallets only tell rejections
    /// apart by code or wording.
    pub fn from_provider(code: Option<i64>, message: String) -> Self {
        const USER_REJECTED: i64 = 4001;
        const USER_REJECTED_WALLET_CONNECT: i64 = 5000;

        let lowercase = message.to_lowercase();
        let rejected = matches!(code, Some(USER_REJECTED | USER_REJECTED_WALLET_CONNECT))
            || ["reject", "cancel", "denied", "declined"]
                .iter()
                .any(|word| lowercase.contains(word));
        if rejected {
            Self::UserCancelled(message)
        } else {
            Self::Failed(message)
        }
    }
}
