use {
    super::{ALICE, account, sign, sign_message, user},
    crate::tests::{self, mock},
    reqwest::StatusCode,
    serde_json::json,
    sha2::{Digest, Sha256},
};

#[tokio::test]
async fn sign_and_verify_message() {
    let node = mock::http::setup(vec![]).await;
    let wallet = mock::http::setup(vec![
        account(),
        mock::wallet::call("tron_signMessage", json!(["hello"]), json!(sign_message("hello"))),
    ])
    .await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "injected")).await;

    gateway.post("wallet/connect", json!({})).await;

    // Empty messages never reach the wallet.
    let (status, body) = gateway.post("sign-message", json!({ "message": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");

    let (status, body) = gateway
        .post("sign-message", json!({ "message": "hello" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "hello");
    assert_eq!(body["signer"], user());
    let signature = body["signature"].as_str().unwrap().to_owned();
    assert_eq!(signature, sign_message("hello"));

    let (status, body) = gateway
        .post(
            "verify/message",
            json!({ "message": "hello", "signer": user(), "signature": signature }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true }));

    let (_, body) = gateway
        .post(
            "verify/message",
            json!({ "message": "hello", "signer": ALICE, "signature": signature }),
        )
        .await;
    assert_eq!(
        body,
        json!({ "valid": false, "reason": "SignerMismatch", "recovered": user() })
    );

    let (_, body) = gateway
        .post(
            "verify/message",
            json!({ "message": "hello", "signer": user() }),
        )
        .await;
    assert_eq!(body, json!({ "valid": false, "reason": "MissingSignature" }));

    let (status, body) = gateway
        .post(
            "verify/message",
            json!({ "message": "hello", "signer": "nope", "signature": signature }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");
}

#[tokio::test]
async fn wallet_connect_signatures_are_unwrapped() {
    let node = mock::http::setup(vec![]).await;
    let wallet = mock::http::setup(vec![
        account(),
        mock::wallet::call(
            "tron_signMessage",
            json!(["hello"]),
            json!({ "result": { "signature": sign_message("hello") } }),
        ),
    ])
    .await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "wallet-connect"))
            .await;

    gateway.post("wallet/connect", json!({})).await;
    let (status, body) = gateway
        .post("sign-message", json!({ "message": "hello" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signature"], sign_message("hello"));
}

#[tokio::test]
async fn verify_transaction() {
    let node = mock::http::setup(vec![]).await;
    let wallet = mock::http::setup(vec![]).await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "injected")).await;

    let raw = hex::decode("0a02d1e122086f5c2e1c2e8a4c9b40e0d6b4a8c531").unwrap();
    let id: [u8; 32] = Sha256::digest(&raw).into();
    let transaction = json!({
        "txID": hex::encode(id),
        "raw_data_hex": hex::encode(&raw),
        "signature": [sign(&id)],
    });

    let (status, body) = gateway
        .post(
            "verify/transaction",
            json!({ "transaction": transaction, "signer": user() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true }));

    let mut tampered = transaction.clone();
    tampered["txID"] = json!("00".repeat(32));
    let (_, body) = gateway
        .post(
            "verify/transaction",
            json!({ "transaction": tampered, "signer": user() }),
        )
        .await;
    assert_eq!(
        body,
        json!({ "valid": false, "reason": "TransactionIdMismatch" })
    );
}
