use {
    super::{Error, Node},
    crate::{
        domain::{
            build::Built,
            encode::{ContractCall, Parameter},
            transaction::{Receipt, SignedTransaction, Transaction},
            tron::{self, Sun, U256},
        },
        infra::metrics,
        util,
    },
    serde::{Serialize, de::DeserializeOwned},
    serde_json::{Value, json},
    std::{
        sync::atomic::{self, AtomicU64},
        time::Duration,
    },
    tracing::Instrument,
};

mod dto;

/// Bindings to a TRON full node's HTTP API, as served by TronGrid.
pub struct TronGrid {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

pub struct Config {
    /// Base URL of the full node, e.g. `https://api.trongrid.io`.
    pub endpoint: reqwest::Url,

    /// TronGrid API key, sent as `TRON-PRO-API-KEY`.
    pub api_key: Option<String>,

    pub timeout: Duration,
}

impl TronGrid {
    pub fn try_new(config: Config) -> Result<Self, CreationError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(api_key) = config.api_key {
            let mut api_key = reqwest::header::HeaderValue::from_str(&api_key)?;
            api_key.set_sensitive(true);
            headers.insert("TRON-PRO-API-KEY", api_key);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    async fn post<T, B>(
        &self,
        name: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, util::http::RoundtripError<dto::Error>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        static ID: AtomicU64 = AtomicU64::new(0);
        let id = ID.fetch_add(1, atomic::Ordering::Relaxed);

        metrics::request_sent("node");
        util::http::roundtrip!(
            <T, dto::Error>;
            self.client
                .post(util::url::join(&self.endpoint, path))
                .json(body)
        )
        .instrument(tracing::trace_span!("node", id = %id, request = name))
        .await
    }
}

#[async_trait::async_trait]
impl Node for TronGrid {
    async fn balance(&self, address: tron::Address) -> Result<Sun, Error> {
        let account: dto::Account = self
            .post(
                "balance",
                "wallet/getaccount",
                &dto::AccountRequest {
                    address,
                    visible: true,
                },
            )
            .await?;
        u64::try_from(account.balance)
            .ok()
            .and_then(Sun::new)
            .ok_or_else(|| Error::UnexpectedResponse(format!("balance {}", account.balance)))
    }

    async fn transfer(
        &self,
        from: tron::Address,
        to: tron::Address,
        amount: Sun,
    ) -> Result<Built, Error> {
        let request = dto::TransferRequest {
            owner_address: from,
            to_address: to,
            amount: amount.get(),
            visible: true,
        };
        match self
            .post::<Value, _>("transfer", "wallet/createtransaction", &request)
            .await
        {
            Ok(transaction) => Ok(built(transaction)),
            Err(util::http::RoundtripError::Api(err)) => Ok(refused(err)),
            Err(util::http::RoundtripError::Http(err)) => Err(err.into()),
        }
    }

    async fn trigger(&self, call: &ContractCall, fee_limit: Sun) -> Result<Built, Error> {
        let request = dto::TriggerRequest {
            owner_address: call.from,
            contract_address: call.contract,
            function_selector: call.function.signature(),
            parameter: encode_parameters(&call.parameters)?,
            fee_limit: fee_limit.get(),
            call_value: call.call_value.get(),
            visible: true,
        };
        let response = match self
            .post::<dto::TriggerResponse, _>("trigger", "wallet/triggersmartcontract", &request)
            .await
        {
            Ok(response) => response,
            Err(util::http::RoundtripError::Api(err)) => return Ok(refused(err)),
            Err(util::http::RoundtripError::Http(err)) => return Err(err.into()),
        };

        let mut diagnostic = response.result;
        decode_message(&mut diagnostic);
        Ok(Built {
            success: diagnostic.get("result") == Some(&Value::Bool(true)),
            diagnostic,
            transaction: response.transaction.map(Transaction),
        })
    }

    async fn broadcast(&self, transaction: &SignedTransaction) -> Result<Receipt, Error> {
        let mut receipt: Value = self
            .post("broadcast", "wallet/broadcasttransaction", &transaction.0)
            .await?;

        decode_message(&mut receipt);
        let id = transaction.0.get("txID");
        if let (Some(receipt), Some(id)) = (receipt.as_object_mut(), id) {
            receipt
                .entry("transaction")
                .or_insert_with(|| json!({ "txID": id }));
        }
        Ok(Receipt(receipt))
    }
}

/// `createtransaction` answers with the bare transaction on success.
fn built(transaction: Value) -> Built {
    let success = transaction.get("txID").is_some();
    Built {
        success,
        diagnostic: if success { json!({}) } else { transaction.clone() },
        transaction: success.then_some(Transaction(transaction)),
    }
}

/// Both builders answer `{"Error": ...}` when they reject the request outright.
fn refused(err: dto::Error) -> Built {
    Built {
        success: false,
        diagnostic: json!({ "Error": err.message }),
        transaction: None,
    }
}

/// ABI encodes static `address` and `uint256` arguments into 32 byte words.
fn encode_parameters(parameters: &[Parameter]) -> Result<Vec<u8>, Error> {
    let mut data = Vec::with_capacity(32 * parameters.len());
    for parameter in parameters {
        let invalid = || Error::InvalidParameter(parameter.abi_type, parameter.value.clone());
        let word = match parameter.abi_type {
            "address" => {
                let address = parameter
                    .value
                    .parse::<tron::Address>()
                    .map_err(|_| invalid())?;
                let mut word = [0; 32];
                word[12..].copy_from_slice(address.account_hash());
                word
            }
            "uint256" => U256::from_str_radix(&parameter.value, 10)
                .map_err(|_| invalid())?
                .to_be_bytes::<32>(),
            _ => return Err(invalid()),
        };
        data.extend_from_slice(&word);
    }
    Ok(data)
}

/// The node hex encodes the message of responses that carry an error `code`.
fn decode_message(value: &mut Value) {
    if value.get("code").is_none() {
        return;
    }
    let decoded = value
        .get("message")
        .and_then(Value::as_str)
        .and_then(|message| hex::decode(message).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());
    if let Some(decoded) = decoded {
        value["message"] = Value::String(decoded);
    }
}

impl From<util::http::RoundtripError<dto::Error>> for Error {
    fn from(err: util::http::RoundtripError<dto::Error>) -> Self {
        match err {
            util::http::RoundtripError::Http(err) => Self::Http(err),
            util::http::RoundtripError::Api(err) => Self::Api {
                code: "Error".to_owned(),
                message: err.message,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error(transparent)]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}
