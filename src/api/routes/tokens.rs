use {
    crate::domain::{Gateway, tron},
    axum::{extract::State, response::Json},
    serde::Serialize,
    std::sync::Arc,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    symbol: String,
    contract: tron::Address,
    decimals: u32,
}

/// The token registry requests may refer to by symbol.
pub async fn tokens(State(gateway): State<Arc<Gateway>>) -> Json<Vec<Token>> {
    Json(
        gateway
            .tokens()
            .0
            .iter()
            .map(|token| Token {
                symbol: token.symbol.clone(),
                contract: token.contract,
                decimals: token.decimals.get(),
            })
            .collect(),
    )
}
