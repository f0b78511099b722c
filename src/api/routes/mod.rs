use {
    crate::{
        domain::{dispatch, intent::ValidationError},
        infra::{self, wallet},
    },
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json},
    },
    serde::Serialize,
};

mod balance;
mod operation;
mod session;
mod signing;
mod tokens;

pub use self::{
    balance::balance,
    operation::{approve, transfer},
    session::{account, accounts_changed, connect, disconnect, status},
    signing::{sign_message, verify_message, verify_transaction},
    tokens::tokens,
};

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn metrics() -> String {
    infra::metrics::encode()
}

/// An error response: `{"kind": ..., "description": ...}`.
#[derive(Debug)]
pub struct Error {
    status: StatusCode,
    kind: &'static str,
    description: String,
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    description: String,
}

impl From<dispatch::Error> for Error {
    fn from(err: dispatch::Error) -> Self {
        let status = match &err {
            dispatch::Error::Busy => StatusCode::CONFLICT,
            dispatch::Error::NotConnected
            | dispatch::Error::Validation(_)
            | dispatch::Error::Provider(wallet::Error::UserCancelled(_)) => StatusCode::BAD_REQUEST,
            dispatch::Error::Build(_) | dispatch::Error::Provider(_) | dispatch::Error::Node(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        let description = match &err {
            dispatch::Error::Build(build) => match build.message() {
                Some(message) => format!("failed to build transaction: {message}"),
                None => err.to_string(),
            },
            _ => err.to_string(),
        };
        Self {
            status,
            kind: err.kind(),
            description,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        dispatch::Error::from(err).into()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                kind: self.kind,
                description: self.description,
            }),
        )
            .into_response()
    }
}
