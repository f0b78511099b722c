//! End-to-end tests of the HTTP API against a mock node and wallet bridge.

use {
    crate::{
        domain::signature,
        infra::recovery,
        tests::mock::{http::Expectation, wallet},
    },
    k256::ecdsa::SigningKey,
    serde_json::{Value, json},
};

mod approve;
mod signing;

/// Recipient and spender of the tests.
pub const ALICE: &str = "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL";
/// [`ALICE`] as an ABI encoded `address` word.
pub const ALICE_WORD: &str = "0000000000000000000000008840e6c55b9ada326d211d818c34a994aeced808";

/// The key of the wallet's account.
pub fn key() -> SigningKey {
    SigningKey::from_slice(&[42; 32]).unwrap()
}

/// The wallet's account.
pub fn user() -> String {
    recovery::address(key().verifying_key()).to_string()
}

/// Signs a digest the way wallets do, as `0x` hex with a 27/28 recovery id.
pub fn sign(digest: &[u8; 32]) -> String {
    let (signature, recovery_id) = key().sign_prehash_recoverable(digest).unwrap();
    let mut bytes = signature.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte() + 27);
    format!("0x{}", hex::encode(bytes))
}

pub fn sign_message(message: &str) -> String {
    sign(&signature::message_digest(message))
}

/// An unsigned transaction as the node builds it.
pub fn transaction(id: &str) -> Value {
    json!({
        "visible": true,
        "txID": id,
        "raw_data": { "expiration": 1_700_000_060_000_u64, "timestamp": 1_700_000_000_000_u64 },
        "raw_data_hex": "0a02d1e1",
    })
}

pub fn signed(transaction: &Value) -> Value {
    let mut signed = transaction.clone();
    signed["signature"] = json!(["ab".repeat(65)]);
    signed
}

/// The wallet reports [`user`] as its account.
pub fn account() -> Expectation {
    wallet::call("tron_getAccount", json!([]), json!({ "address": user() }))
}
