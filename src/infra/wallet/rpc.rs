//! JSON-RPC 2.0 over HTTP to the wallet bridge.

use {
    super::Error,
    crate::{infra::metrics, util},
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    std::{
        sync::atomic::{self, AtomicU64},
        time::Duration,
    },
    tracing::Instrument,
};

/// Parameters of methods that take none.
pub const NO_PARAMS: [(); 0] = [];

pub struct Client {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl Client {
    pub fn try_new(endpoint: reqwest::Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    /// Calls `method` and returns the raw `result`. Errors reported by the
    /// wallet are classified into rejections and failures.
    pub async fn call<P, R>(&self, method: &'static str, params: P) -> Result<R, Error>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        static ID: AtomicU64 = AtomicU64::new(0);
        let id = ID.fetch_add(1, atomic::Ordering::Relaxed);

        metrics::request_sent("wallet");
        let response = util::http::roundtrip!(
            <Success<R>, Failure>;
            self.client.post(self.endpoint.clone()).json(&Request {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
        )
        .instrument(tracing::trace_span!("wallet", id = %id, method))
        .await;

        match response {
            Ok(success) => Ok(success.result),
            Err(util::http::RoundtripError::Api(failure)) => Err(Error::from_provider(
                Some(failure.error.code),
                failure.error.message,
            )),
            Err(util::http::RoundtripError::Http(err)) => Err(err.into()),
        }
    }
}

#[derive(Serialize)]
struct Request<P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: P,
}

#[derive(Deserialize)]
struct Success<R> {
    result: R,
}

#[derive(Deserialize)]
struct Failure {
    error: RpcError,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}
