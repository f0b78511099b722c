//! Folds the two broadcast paths into one [`OperationResult`].

use {
    crate::domain::{
        dispatch::Mode,
        transaction::{Receipt, SignedTransaction, Transaction},
        tron,
    },
    chrono::{DateTime, Utc},
};

/// The normalized outcome of one dispatched transaction.
#[derive(Clone, Debug)]
pub struct OperationResult {
    pub original_transaction: Transaction,
    /// Only present in [`Mode::SignOnly`]; the wallet never hands out the
    /// signed payload when it broadcasts itself.
    pub signed_transaction: Option<SignedTransaction>,
    pub broadcast_result: Receipt,
    pub transaction_id: Option<String>,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub signer: tron::Address,
    pub mode: Mode,
}

impl OperationResult {
    /// The message attached to the receipt, unmodified.
    pub fn message(&self) -> Option<&str> {
        self.broadcast_result.message()
    }

    pub fn failure(&self) -> Option<BroadcastError> {
        (!self.success).then(|| BroadcastError {
            code: self.broadcast_result.code().map(str::to_owned),
            message: self.message().map(str::to_owned),
        })
    }
}

/// Builds the result record. This never fails: any receipt shape yields a
/// result, unknown shapes are simply unsuccessful.
pub fn normalize(
    original_transaction: Transaction,
    signed_transaction: Option<SignedTransaction>,
    receipt: Receipt,
    signer: tron::Address,
    mode: Mode,
) -> OperationResult {
    OperationResult {
        original_transaction,
        signed_transaction,
        success: receipt.succeeded(),
        transaction_id: receipt.txid(),
        broadcast_result: receipt,
        timestamp: Utc::now(),
        signer,
        mode,
    }
}

/// The transaction was submitted but not accepted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("broadcast failed: {}", .message.as_deref().unwrap_or("no message"))]
pub struct BroadcastError {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// A message signed by the connected account.
#[derive(Clone, Debug)]
pub struct SignedMessage {
    pub message: String,
    pub signature: String,
    pub signer: tron::Address,
    pub timestamp: DateTime<Utc>,
}
