use {
    super::{ALICE, ALICE_WORD, transaction, user},
    crate::tests::{self, mock},
    reqwest::StatusCode,
    serde_json::json,
};

fn trigger(contract: &str, amount_word: &str, tx: &serde_json::Value) -> mock::http::Expectation {
    mock::node::trigger(
        json!({
            "owner_address": user(),
            "contract_address": contract,
            "function_selector": "approve(address,uint256)",
            "parameter": format!("{ALICE_WORD}{amount_word}"),
            "fee_limit": 50_000_000,
            "call_value": 0,
            "visible": true,
        }),
        json!({ "result": { "result": true }, "transaction": tx }),
    )
}

#[tokio::test]
async fn unlimited_through_wallet_connect() {
    let tx = transaction("c3");
    let node = mock::http::setup(vec![trigger(
        "TEkxiTehnzSmSe2XqrBj4w32RUN966rdz8",
        &"f".repeat(64),
        &tx,
    )])
    .await;
    let wallet = mock::http::setup(vec![
        mock::wallet::call(
            "tron_getAccount",
            json!([]),
            json!({ "wcResult": { "address": user() } }),
        ),
        mock::wallet::call(
            "tron_signAndSendTransaction",
            json!([tx]),
            json!({ "wcResult": { "result": true, "txid": "c3" } }),
        ),
    ])
    .await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "wallet-connect"))
            .await;

    let (_, body) = gateway.post("wallet/connect", json!({})).await;
    assert_eq!(body["account"], user());

    let (status, body) = gateway
        .post(
            "approve",
            json!({
                "spender": ALICE,
                "token": "usdc",
                "unlimited": true,
                "mode": "sign-and-send",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["transactionId"], "c3");
    assert_eq!(body["broadcastResult"], json!({ "result": true, "txid": "c3" }));
}

#[tokio::test]
async fn registry_decimals_are_used() {
    let tx = transaction("d4");
    let node = mock::http::setup(vec![
        trigger(
            "TCFLL5dx5ZJdKnWuesXxi1VPwjLVmWZZy9",
            "00000000000000000000000000000000000000000000000006f05b59d3b20000",
            &tx,
        ),
        mock::node::broadcast(
            super::signed(&tx),
            json!({ "result": true, "txid": "d4" }),
        ),
    ])
    .await;
    let wallet = mock::http::setup(vec![
        super::account(),
        mock::wallet::call("tron_signTransaction", json!([tx]), super::signed(&tx)),
    ])
    .await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "injected")).await;

    gateway.post("wallet/connect", json!({})).await;
    let (status, body) = gateway
        .post(
            "approve",
            json!({
                "spender": ALICE,
                "token": "TCFLL5dx5ZJdKnWuesXxi1VPwjLVmWZZy9",
                "decimals": 6,
                "amount": "0.5",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["mode"], "sign-only");
    assert_eq!(body["transactionId"], "d4");
}

#[tokio::test]
async fn amount_or_unlimited() {
    let node = mock::http::setup(vec![]).await;
    let wallet = mock::http::setup(vec![super::account()]).await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "injected")).await;

    gateway.post("wallet/connect", json!({})).await;
    for approval in [
        json!({ "spender": ALICE, "token": "USDT" }),
        json!({ "spender": ALICE, "token": "USDT", "amount": "1", "unlimited": true }),
    ] {
        let (status, body) = gateway.post("approve", approval.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{approval}");
        assert_eq!(body["kind"], "ValidationError", "{approval}");
    }
}

#[tokio::test]
async fn rejected_trigger_is_a_build_error() {
    let node = mock::http::setup(vec![mock::node::trigger(
        json!({
            "owner_address": user(),
            "contract_address": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
            "function_selector": "approve(address,uint256)",
            "parameter": format!(
                "{ALICE_WORD}00000000000000000000000000000000000000000000000000000000000f4240"
            ),
            "fee_limit": 50_000_000,
            "call_value": 0,
            "visible": true,
        }),
        json!({
            "Error": "class org.tron.core.exceptions.ContractValidateException : \
                      No contract or not a smart contract"
        }),
    )])
    .await;
    let wallet = mock::http::setup(vec![super::account()]).await;
    let gateway =
        tests::Gateway::new(tests::config(&node.address, &wallet.address, "injected")).await;

    gateway.post("wallet/connect", json!({})).await;
    let (status, body) = gateway
        .post(
            "approve",
            json!({ "spender": ALICE, "token": "USDT", "amount": "1" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "BuildError");
    assert_eq!(
        body["description"],
        "failed to build transaction: class org.tron.core.exceptions.\
         ContractValidateException : No contract or not a smart contract"
    );
}
