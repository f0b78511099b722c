//! HTTP roundtrip helpers shared by the node and wallet bridge adapters.

use {
    hyper::StatusCode,
    serde::{Deserialize, de::DeserializeOwned},
};

/// Sends the request and deserializes the JSON response body either into the
/// API specific error type or into the expected value. The error type is
/// tried first, so it must only match error bodies.
///
/// Prefer the [`roundtrip!`] macro which takes care of logging.
pub async fn roundtrip_internal<T, E>(
    request: reqwest::RequestBuilder,
    log_request: impl FnOnce(&reqwest::Request),
    log_response: impl FnOnce(StatusCode, &str),
) -> Result<T, RoundtripError<E>>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let (client, request) = request.build_split();
    let request = request.map_err(Error::Reqwest)?;
    log_request(&request);

    let response = client.execute(request).await.map_err(Error::Reqwest)?;
    let status = response.status();
    let body = response.text().await.map_err(Error::Reqwest)?;
    log_response(status, &body);

    match serde_json::from_str::<Response<T, E>>(&body) {
        Ok(Response::Ok(value)) if status.is_success() => Ok(value),
        Ok(Response::Err(err)) => Err(RoundtripError::Api(err)),
        Ok(Response::Ok(_)) => Err(Error::Status(status, body).into()),
        Err(err) if status.is_success() => Err(Error::Json(err, body).into()),
        Err(_) => Err(Error::Status(status, body).into()),
    }
}

/// Performs a JSON roundtrip for the given request builder.
///
/// ```text
/// roundtrip!(<ResponseDto, ErrorDto>; client.post(url).json(&body))
/// ```
macro_rules! roundtrip {
    (<$t:ty, $e:ty>; $request:expr) => {
        $crate::util::http::roundtrip_internal::<$t, $e>(
            $request,
            |request| {
                tracing::trace!(
                    method = %request.method(),
                    url = %request.url(),
                    body = ?request
                        .body()
                        .and_then(|body| body.as_bytes())
                        .map(String::from_utf8_lossy),
                    "sending request"
                );
            },
            |status, body| {
                tracing::trace!(%status, %body, "received response");
            },
        )
    };
}

pub(crate) use roundtrip;

#[derive(Deserialize)]
#[serde(untagged)]
enum Response<T, E> {
    Err(E),
    Ok(T),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(reqwest::Error),
    #[error("unexpected HTTP status {0}: {1}")]
    Status(StatusCode, String),
    #[error("malformed JSON response: {0}: {1}")]
    Json(serde_json::Error, String),
}

/// A roundtrip failed either at the transport level or because the remote
/// API answered with its error payload.
#[derive(Debug)]
pub enum RoundtripError<E> {
    Http(Error),
    Api(E),
}

impl<E> From<Error> for RoundtripError<E> {
    fn from(err: Error) -> Self {
        Self::Http(err)
    }
}
