//! secp256k1 public key recovery.

use {
    crate::domain::{signature::Signature, tron},
    alloy::primitives::keccak256,
    k256::ecdsa::{self, RecoveryId, VerifyingKey},
};

/// Recovers the address that produced a signature over a 32 byte digest.
#[cfg_attr(test, mockall::automock)]
pub trait Recover: Send + Sync {
    fn recover(&self, digest: &[u8; 32], signature: &Signature) -> Option<tron::Address>;
}

pub struct Secp256k1;

impl Recover for Secp256k1 {
    fn recover(&self, digest: &[u8; 32], signature: &Signature) -> Option<tron::Address> {
        let rs = ecdsa::Signature::from_slice(signature.rs()).ok()?;
        // Wallets use both the raw recovery id and the Ethereum style 27/28.
        let v = match signature.v() {
            v @ (0 | 1) => v,
            v @ (27 | 28) => v - 27,
            _ => return None,
        };
        let key = VerifyingKey::recover_from_prehash(digest, &rs, RecoveryId::from_byte(v)?).ok()?;
        Some(address(&key))
    }
}

/// The address controlled by a public key: the last 20 bytes of the keccak
/// hash of the uncompressed key.
pub fn address(key: &VerifyingKey) -> tron::Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut account = [0; 20];
    account.copy_from_slice(&hash[12..]);
    tron::Address::from_account_hash(account)
}
