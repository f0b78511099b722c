//! Expectations for requests to the TronGrid full node API.

use {
    super::http::{Expectation, Path, RequestBody},
    serde_json::{Value, json},
};

/// `POST /wallet/getaccount` answering with the given balance in sun.
pub fn balance(address: &str, sun: u64) -> Expectation {
    Expectation::post(
        Path::exact("wallet/getaccount"),
        RequestBody::Exact(json!({ "address": address, "visible": true })),
        json!({ "address": address, "balance": sun }),
    )
}

/// `POST /wallet/createtransaction` answering with `res`.
pub fn create_transaction(from: &str, to: &str, sun: u64, res: Value) -> Expectation {
    Expectation::post(
        Path::exact("wallet/createtransaction"),
        RequestBody::Exact(json!({
            "owner_address": from,
            "to_address": to,
            "amount": sun,
            "visible": true,
        })),
        res,
    )
}

/// `POST /wallet/triggersmartcontract` answering with `res`.
pub fn trigger(req: Value, res: Value) -> Expectation {
    Expectation::post(
        Path::exact("wallet/triggersmartcontract"),
        RequestBody::Exact(req),
        res,
    )
}

/// `POST /wallet/broadcasttransaction` of exactly `signed`.
pub fn broadcast(signed: Value, res: Value) -> Expectation {
    Expectation::post(
        Path::exact("wallet/broadcasttransaction"),
        RequestBody::Exact(signed),
        res,
    )
}
