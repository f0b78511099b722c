use crate::{
    domain::{
        build::Built,
        encode::ContractCall,
        transaction::{Receipt, SignedTransaction},
        tron::{self, Sun},
    },
    util,
};

pub mod trongrid;

pub use self::trongrid::TronGrid;

/// The chain client: queries balances, builds unsigned transactions and
/// submits signed ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// Native balance of the account. Accounts the node has never seen have
    /// a zero balance.
    async fn balance(&self, address: tron::Address) -> Result<Sun, Error>;

    /// Builds a native transfer.
    async fn transfer(
        &self,
        from: tron::Address,
        to: tron::Address,
        amount: Sun,
    ) -> Result<Built, Error>;

    /// Builds a contract trigger.
    async fn trigger(&self, call: &ContractCall, fee_limit: Sun) -> Result<Built, Error>;

    /// Submits a signed transaction as is.
    async fn broadcast(&self, transaction: &SignedTransaction) -> Result<Receipt, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node error {code}: {message}")]
    Api { code: String, message: String },
    #[error("cannot encode {0} parameter {1:?}")]
    InvalidParameter(&'static str, String),
    #[error("unexpected node response: {0}")]
    UnexpectedResponse(String),
    #[error(transparent)]
    Http(#[from] util::http::Error),
}
