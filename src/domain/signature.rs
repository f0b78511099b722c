//! Checks that a signature was produced by the claimed account.

use {
    crate::{
        domain::{transaction::SignedTransaction, tron},
        infra::recovery::Recover,
    },
    alloy::primitives::keccak256,
    sha2::{Digest, Sha256},
};

/// Length of a hex encoded `r || s || v` signature.
pub const HEX_LEN: usize = 130;

/// A 65 byte recoverable secp256k1 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature([u8; 65]);

impl Signature {
    /// Parses `130` hex characters, optionally prefixed with `0x`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != HEX_LEN {
            return None;
        }
        let mut bytes = [0; 65];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    pub fn rs(&self) -> &[u8] {
        &self.0[..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Valid,
    Invalid(Reason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    MissingSignature,
    MalformedSignature,
    /// The transaction id is not the hash of the raw transaction data.
    TransactionIdMismatch,
    Unrecoverable,
    /// The signature is valid, but for another account.
    SignerMismatch(tron::Address),
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::MissingSignature => "MissingSignature",
            Reason::MalformedSignature => "MalformedSignature",
            Reason::TransactionIdMismatch => "TransactionIdMismatch",
            Reason::Unrecoverable => "Unrecoverable",
            Reason::SignerMismatch(_) => "SignerMismatch",
        }
    }
}

/// The digest a wallet signs for a UTF-8 message.
pub fn message_digest(message: &str) -> [u8; 32] {
    let mut data = format!("\x19TRON Signed Message:\n{}", message.len()).into_bytes();
    data.extend_from_slice(message.as_bytes());
    keccak256(data).0
}

pub fn verify_message(
    recover: &dyn Recover,
    message: &str,
    signer: tron::Address,
    signature: Option<&str>,
) -> Verification {
    let signature = match parse(signature) {
        Ok(signature) => signature,
        Err(reason) => return Verification::Invalid(reason),
    };
    check(recover, &message_digest(message), &signature, signer)
}

/// Verifies the first signature of a signed transaction over its id.
pub fn verify_transaction(
    recover: &dyn Recover,
    transaction: &SignedTransaction,
    signer: tron::Address,
) -> Verification {
    let tx = &transaction.0;
    let signature = match parse(tx.pointer("/signature/0").and_then(|s| s.as_str())) {
        Ok(signature) => signature,
        Err(reason) => return Verification::Invalid(reason),
    };
    let Some(id) = transaction_id(tx) else {
        return Verification::Invalid(Reason::TransactionIdMismatch);
    };
    check(recover, &id, &signature, signer)
}

fn parse(signature: Option<&str>) -> Result<Signature, Reason> {
    let signature = signature
        .filter(|s| !s.is_empty())
        .ok_or(Reason::MissingSignature)?;
    Signature::from_hex(signature).ok_or(Reason::MalformedSignature)
}

/// The transaction id, if it matches the raw data it claims to identify.
fn transaction_id(tx: &serde_json::Value) -> Option<[u8; 32]> {
    let mut id = [0; 32];
    hex::decode_to_slice(tx.get("txID")?.as_str()?, &mut id).ok()?;
    let raw = hex::decode(tx.get("raw_data_hex")?.as_str()?).ok()?;
    (Sha256::digest(raw)[..] == id[..]).then_some(id)
}

fn check(
    recover: &dyn Recover,
    digest: &[u8; 32],
    signature: &Signature,
    signer: tron::Address,
) -> Verification {
    match recover.recover(digest, signature) {
        Some(recovered) if recovered == signer => Verification::Valid,
        Some(recovered) => Verification::Invalid(Reason::SignerMismatch(recovered)),
        None => Verification::Invalid(Reason::Unrecoverable),
    }
}
