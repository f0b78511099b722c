use {
    reqwest::StatusCode,
    std::{io::Write, net::SocketAddr},
    tokio::{sync::oneshot, task::JoinHandle},
};

mod gateway;

/// A gateway configuration.
pub enum Config {
    /// A TOML document, written to a temporary file.
    String(String),
}

impl Config {
    fn to_path(&self) -> tempfile::TempPath {
        match self {
            Config::String(contents) => {
                let mut file = tempfile::NamedTempFile::new().unwrap();
                file.write_all(contents.as_bytes()).unwrap();
                file.into_temp_path()
            }
        }
    }
}

/// A gateway configuration talking to the given mock node and wallet bridge.
pub fn config(node: &SocketAddr, wallet: &SocketAddr, kind: &str) -> Config {
    Config::String(format!(
        r"
node-url = 'http://{node}/'
request-timeout = '5s'

[wallet]
kind = '{kind}'
endpoint = 'http://{wallet}/'
",
    ))
}

/// A gateway instance for tests, serving the real API on an ephemeral port.
pub struct Gateway {
    url: reqwest::Url,
    client: reqwest::Client,
    handle: JoinHandle<()>,
    _config: tempfile::TempPath,
}

impl Gateway {
    pub async fn new(config: Config) -> Self {
        let (bind, bind_receiver) = oneshot::channel();

        let config = config.to_path();
        let args = vec![
            "/test/tron-gateway/path".to_owned(),
            "--addr=0.0.0.0:0".to_owned(),
            "--log=warn,tron_gateway=trace".to_owned(),
            format!("--config={}", config.display()),
        ];
        let handle = tokio::spawn(crate::run::run(args, Some(bind)));

        let addr = bind_receiver.await.unwrap();
        Self {
            url: format!("http://{addr}/").parse().unwrap(),
            client: reqwest::Client::new(),
            handle,
            _config: config,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let res = self
            .client
            .get(crate::util::url::join(&self.url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let res = self
            .client
            .post(crate::util::url::join(&self.url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    pub async fn text(&self, path: &str) -> (StatusCode, String) {
        let res = self
            .client
            .get(crate::util::url::join(&self.url, path))
            .send()
            .await
            .unwrap();
        (res.status(), res.text().await.unwrap())
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
