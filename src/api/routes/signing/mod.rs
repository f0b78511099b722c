use {
    super::Error,
    crate::domain::{Gateway, transaction::SignedTransaction},
    axum::{extract::State, response::Json},
    std::sync::Arc,
};

mod dto;

pub async fn sign_message(
    State(gateway): State<Arc<Gateway>>,
    Json(body): Json<dto::SignMessage>,
) -> Result<Json<dto::Signed>, Error> {
    let signed = gateway.sign_message(&body.message).await?;
    Ok(Json(dto::Signed::from_domain(signed)))
}

/// Checks a message signature. An invalid signature is a `200` with
/// `valid: false`; only a malformed signer address is an error.
pub async fn verify_message(
    State(gateway): State<Arc<Gateway>>,
    Json(body): Json<dto::VerifyMessage>,
) -> Result<Json<dto::Verified>, Error> {
    let verification =
        gateway.verify_message(&body.message, &body.signer, body.signature.as_deref())?;
    Ok(Json(dto::Verified::from_domain(verification)))
}

pub async fn verify_transaction(
    State(gateway): State<Arc<Gateway>>,
    Json(body): Json<dto::VerifyTransaction>,
) -> Result<Json<dto::Verified>, Error> {
    let verification =
        gateway.verify_transaction(&SignedTransaction(body.transaction), &body.signer)?;
    Ok(Json(dto::Verified::from_domain(verification)))
}
