//! Opaque values exchanged with the node and the wallet.
//!
//! The gateway never looks inside transactions it didn't build the parameters
//! for. They are carried around as JSON exactly as received.

use serde_json::Value;

/// An unsigned transaction as built by the node.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction(pub Value);

/// A transaction carrying the wallet's signature.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTransaction(pub Value);

/// The answer to submitting a signed transaction, either from the node's raw
/// broadcast or from the wallet's atomic sign-and-send.
///
/// Adapters translate whatever their collaborator returns into the node's
/// shape: `{"result": bool, "txid"?: string, "transaction"?: {"txID"},
/// "code"?: string, "message"?: string}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt(pub Value);

impl Receipt {
    /// Only a literal `true` in the top level `result` field counts.
    pub fn succeeded(&self) -> bool {
        self.0.get("result") == Some(&Value::Bool(true))
    }

    /// The explicit `txid`, falling back to `transaction.txID`.
    pub fn txid(&self) -> Option<String> {
        let non_empty = |value: &Value| {
            value
                .as_str()
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
        };
        self.0
            .get("txid")
            .and_then(non_empty)
            .or_else(|| self.0.pointer("/transaction/txID").and_then(non_empty))
    }

    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}
