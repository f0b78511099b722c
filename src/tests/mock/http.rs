//! A scripted HTTP server standing in for the node and the wallet bridge.
//! Both only ever receive JSON POSTs, answered strictly in order.

use {
    anyhow::ensure,
    axum::{
        extract::{Json, State},
        http::{Method, StatusCode, Uri},
        response::{IntoResponse, Response},
    },
    serde_json::{Value, json},
    std::{
        collections::VecDeque,
        net::SocketAddr,
        sync::{Arc, Mutex},
    },
    tokio::task::JoinHandle,
};

/// The path a request is expected on, relative to the server root.
#[derive(Clone, Debug)]
pub enum Path {
    /// Any path. Wallet bridges may be mounted anywhere.
    Any,
    Exact(String),
}

impl Path {
    pub fn exact(s: impl ToString) -> Self {
        Self::Exact(s.to_string())
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Path::Any => true,
            Path::Exact(exact) => exact.trim_start_matches('/') == path.trim_start_matches('/'),
        }
    }
}

#[derive(Clone, Debug)]
pub enum RequestBody {
    Exact(Value),
    /// A JSON-RPC 2.0 request. The id is only required to be a number since
    /// the gateway hands them out from a process wide counter.
    Rpc { method: String, params: Value },
    Any,
}

impl RequestBody {
    fn check(&self, body: &Value) -> anyhow::Result<()> {
        match self {
            RequestBody::Exact(expected) => {
                ensure!(body == expected, "expected body {expected}, got {body}");
            }
            RequestBody::Rpc { method, params } => {
                ensure!(body["jsonrpc"] == "2.0", "not a JSON-RPC 2.0 request: {body}");
                ensure!(body["id"].is_u64(), "request id must be a number: {body}");
                ensure!(
                    body["method"] == method.as_str(),
                    "expected a call of {method}, got {}",
                    body["method"]
                );
                ensure!(
                    &body["params"] == params,
                    "{method} called with {}, expected {params}",
                    body["params"]
                );
            }
            RequestBody::Any => (),
        }
        Ok(())
    }
}

/// One request the server expects and the JSON it answers with.
#[derive(Clone, Debug)]
pub struct Expectation {
    pub path: Path,
    pub req: RequestBody,
    pub res: Value,
}

impl Expectation {
    pub fn post(path: Path, req: RequestBody, res: Value) -> Self {
        Self { path, req, res }
    }
}

#[derive(Default)]
struct Script {
    pending: Mutex<VecDeque<Expectation>>,
    /// Requests that did not match, reported when the handle is dropped.
    failures: Mutex<Vec<String>>,
}

/// Verifies on drop that every expected request arrived and nothing else did.
pub struct ServerHandle {
    pub address: SocketAddr,
    handle: JoinHandle<()>,
    script: Arc<Script>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let finished = self.handle.is_finished();
        self.handle.abort();
        // The test already failed, its own message is the useful one.
        if std::thread::panicking() {
            return;
        }

        assert!(!finished, "mock server stopped before the test ended");
        let failures = self.script.failures.lock().unwrap();
        assert!(failures.is_empty(), "mock server got bad requests: {failures:#?}");
        let pending = self.script.pending.lock().unwrap();
        assert!(
            pending.is_empty(),
            "mock server is still waiting for {} request(s): {pending:#?}",
            pending.len()
        );
    }
}

/// Starts a server answering `expectations` in the given order.
pub async fn setup(expectations: Vec<Expectation>) -> ServerHandle {
    let script = Arc::new(Script {
        pending: Mutex::new(expectations.into()),
        ..Default::default()
    });

    let app = axum::Router::new()
        .fallback(respond)
        .with_state(script.clone());
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let address = server.local_addr();
    let handle = tokio::spawn(async move { server.await.unwrap() });

    ServerHandle {
        address,
        handle,
        script,
    }
}

async fn respond(
    State(script): State<Arc<Script>>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let next = script.pending.lock().unwrap().pop_front();
    match answer(next, &method, &uri, &body) {
        Ok(res) => Json(res).into_response(),
        Err(err) => {
            let failure = format!("{method} {uri} {body}: {err}");
            tracing::error!(%failure, "mock server got an unexpected request");
            script.failures.lock().unwrap().push(failure.clone());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "mockFailure": failure })),
            )
                .into_response()
        }
    }
}

fn answer(
    next: Option<Expectation>,
    method: &Method,
    uri: &Uri,
    body: &Value,
) -> anyhow::Result<Value> {
    let Some(expected) = next else {
        anyhow::bail!("no more requests expected");
    };
    ensure!(*method == Method::POST, "expected a POST, got {method}");
    ensure!(
        expected.path.matches(uri.path()),
        "expected path {:?}, got {}",
        expected.path,
        uri.path()
    );
    expected.req.check(body)?;
    Ok(expected.res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc(method: &str, params: Value) -> RequestBody {
        RequestBody::Rpc {
            method: method.to_owned(),
            params,
        }
    }

    #[test]
    fn paths_ignore_leading_slashes() {
        assert!(Path::exact("wallet/getaccount").matches("/wallet/getaccount"));
        assert!(!Path::exact("wallet/getaccount").matches("/wallet/getnowblock"));
        assert!(Path::Any.matches("/"));
    }

    #[test]
    fn exact_bodies_compare_everything() {
        let body = RequestBody::Exact(json!({ "address": "T1", "visible": true }));
        assert!(body.check(&json!({ "visible": true, "address": "T1" })).is_ok());

        let err = body.check(&json!({ "address": "T1" })).unwrap_err();
        assert!(err.to_string().starts_with("expected body"), "{err}");
    }

    fn request(id: Value, method: &str, params: Value) -> Value {
        json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
    }

    #[test]
    fn rpc_bodies_accept_any_numeric_id() {
        let body = rpc("tron_signMessage", json!(["hello"]));
        for id in [0, 7, 1234] {
            let req = request(json!(id), "tron_signMessage", json!(["hello"]));
            assert!(body.check(&req).is_ok(), "{req}");
        }
    }

    #[test]
    fn rpc_bodies_check_method_and_params() {
        let body = rpc("tron_signMessage", json!(["hello"]));
        let mut unversioned = request(json!(1), "tron_signMessage", json!(["hello"]));
        unversioned.as_object_mut().unwrap().remove("jsonrpc");
        for (req, error) in [
            (
                request(json!(1), "tron_getAccount", json!([])),
                "expected a call of tron_signMessage",
            ),
            (
                request(json!(1), "tron_signMessage", json!(["x"])),
                "tron_signMessage called with [\"x\"]",
            ),
            (
                request(json!("a"), "tron_signMessage", json!(["hello"])),
                "request id must be a number",
            ),
            (unversioned, "not a JSON-RPC 2.0 request"),
        ] {
            let err = body.check(&req).unwrap_err().to_string();
            assert!(err.starts_with(error), "{err}");
        }
    }

    #[tokio::test]
    async fn answers_in_order() {
        let server = setup(vec![
            Expectation::post(Path::exact("first"), RequestBody::Any, json!(1)),
            Expectation::post(Path::Any, rpc("tron_disconnect", json!([])), json!(2)),
        ])
        .await;
        let client = reqwest::Client::new();
        let url = format!("http://{}", server.address);

        let first = client
            .post(format!("{url}/first"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(first.json::<Value>().await.unwrap(), json!(1));

        let second = client
            .post(&url)
            .json(&request(json!(3), "tron_disconnect", json!([])))
            .send()
            .await
            .unwrap();
        assert_eq!(second.json::<Value>().await.unwrap(), json!(2));
    }

    #[tokio::test]
    #[should_panic(expected = "mock server is still waiting for 1 request(s)")]
    async fn missing_requests_fail_the_test() {
        let _server = setup(vec![Expectation::post(
            Path::Any,
            RequestBody::Any,
            json!(null),
        )])
        .await;
    }

    #[tokio::test]
    #[should_panic(expected = "mock server got bad requests")]
    async fn unexpected_requests_fail_the_test() {
        let server = setup(vec![]).await;
        let res = reqwest::Client::new()
            .post(format!("http://{}/wallet/getaccount", server.address))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
