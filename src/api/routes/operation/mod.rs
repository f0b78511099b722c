use {
    super::Error,
    crate::domain::Gateway,
    axum::{extract::State, response::Json},
    std::sync::Arc,
};

mod dto;

/// Sends TRX or tokens from the connected account. A broadcast the chain
/// refused still answers `200` with `success: false`.
pub async fn transfer(
    State(gateway): State<Arc<Gateway>>,
    Json(transfer): Json<dto::Transfer>,
) -> Result<Json<dto::Operation>, Error> {
    let result = gateway.transfer(transfer.into_domain()).await?;
    Ok(Json(dto::Operation::from_domain(result)))
}

pub async fn approve(
    State(gateway): State<Arc<Gateway>>,
    Json(approval): Json<dto::Approval>,
) -> Result<Json<dto::Operation>, Error> {
    let result = gateway.approve(approval.into_domain()?).await?;
    Ok(Json(dto::Operation::from_domain(result)))
}
