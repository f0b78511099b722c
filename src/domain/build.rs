//! Materializes transactions through the node's builders.

use {
    crate::{
        domain::{dispatch, encode::Call, transaction::Transaction, tron::Sun},
        infra::node::Node,
    },
    serde_json::Value,
};

/// The node's answer to a build request.
#[derive(Clone, Debug, PartialEq)]
pub struct Built {
    /// The builder's own success flag.
    pub success: bool,
    /// Whatever the builder reported besides the transaction, kept verbatim
    /// for diagnostics.
    pub diagnostic: Value,
    pub transaction: Option<Transaction>,
}

/// Builds the unsigned transaction for `call`. Contract triggers are limited
/// to spending `fee_limit` on resources.
pub async fn build(
    node: &dyn Node,
    call: &Call,
    fee_limit: Sun,
) -> Result<Transaction, dispatch::Error> {
    let built = match call {
        Call::Native { from, to, amount } => node.transfer(*from, *to, *amount).await?,
        Call::Contract(call) => node.trigger(call, fee_limit).await?,
    };
    match built {
        Built {
            success: true,
            transaction: Some(transaction),
            ..
        } => Ok(transaction),
        Built { diagnostic, .. } => Err(BuildError(diagnostic).into()),
    }
}

/// The node refused to build the transaction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("failed to build transaction: {0}")]
pub struct BuildError(pub Value);

impl BuildError {
    /// The builder's message, if it sent one. Native transfer builders
    /// report it under `Error`.
    pub fn message(&self) -> Option<&str> {
        ["message", "Error"]
            .into_iter()
            .find_map(|key| self.0.get(key).and_then(Value::as_str))
    }
}
