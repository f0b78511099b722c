use {
    super::Error,
    crate::domain::Gateway,
    axum::{
        extract::{Path, State},
        response::Json,
    },
    serde::Serialize,
    std::sync::Arc,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    address: String,
    /// Balance in sun, as a decimal string.
    sun: String,
    /// Balance in TRX.
    trx: String,
}

pub async fn balance(
    State(gateway): State<Arc<Gateway>>,
    Path(address): Path<String>,
) -> Result<Json<Balance>, Error> {
    let balance = gateway.balance(&address).await?;
    Ok(Json(Balance {
        address,
        sun: balance.get().to_string(),
        trx: balance.to_trx().to_string(),
    }))
}
