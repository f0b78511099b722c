//! DTOs for the full node HTTP API. All requests use `visible: true`, so
//! addresses travel as base58.

use {
    crate::domain::tron,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

#[derive(Debug, Serialize)]
pub struct AccountRequest {
    pub address: tron::Address,
    pub visible: bool,
}

/// The node answers `{}` for accounts it has never seen.
#[derive(Debug, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub balance: i64,
}

#[derive(Debug, Serialize)]
pub struct TransferRequest {
    pub owner_address: tron::Address,
    pub to_address: tron::Address,
    pub amount: u64,
    pub visible: bool,
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct TriggerRequest {
    pub owner_address: tron::Address,
    pub contract_address: tron::Address,
    pub function_selector: &'static str,
    /// ABI encoded arguments, hex without `0x`.
    #[serde_as(as = "serde_with::hex::Hex")]
    pub parameter: Vec<u8>,
    pub fee_limit: u64,
    pub call_value: u64,
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct TriggerResponse {
    /// `{"result": true}` or `{"code": "...", "message": "<hex>"}`.
    pub result: serde_json::Value,
    pub transaction: Option<serde_json::Value>,
}

/// Returned by the builders and lookups on invalid input.
#[derive(Debug, Deserialize)]
pub struct Error {
    #[serde(rename = "Error")]
    pub message: String,
}
