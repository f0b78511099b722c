use {
    super::Error,
    crate::domain::Gateway,
    axum::{extract::State, response::Json},
    std::sync::Arc,
};

mod dto;

/// Connects the wallet. A silent connect only picks up an account the user
/// already authorized and never fails.
pub async fn connect(
    State(gateway): State<Arc<Gateway>>,
    body: Option<Json<dto::Connect>>,
) -> Result<Json<dto::Account>, Error> {
    let connect = body.map(|Json(connect)| connect).unwrap_or_default();
    let account = if connect.silent {
        gateway.probe().await
    } else {
        Some(gateway.connect().await?)
    };
    Ok(Json(dto::Account { account }))
}

pub async fn disconnect(
    State(gateway): State<Arc<Gateway>>,
) -> Result<Json<dto::Account>, Error> {
    gateway.disconnect().await?;
    Ok(Json(dto::Account { account: None }))
}

pub async fn account(State(gateway): State<Arc<Gateway>>) -> Json<dto::Account> {
    Json(dto::Account {
        account: gateway.account(),
    })
}

pub async fn accounts_changed(
    State(gateway): State<Arc<Gateway>>,
    Json(body): Json<dto::AccountsChanged>,
) -> Result<Json<dto::Account>, Error> {
    let account = gateway.accounts_changed(&body.accounts)?;
    Ok(Json(dto::Account { account }))
}

pub async fn status(State(gateway): State<Arc<Gateway>>) -> Json<dto::Status> {
    let (busy, state) = gateway.status();
    Json(dto::Status {
        account: gateway.account(),
        busy,
        state: state.as_str(),
    })
}
