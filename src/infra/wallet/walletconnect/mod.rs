use {
    super::{Error, Wallet, rpc},
    crate::domain::{
        transaction::{Receipt, SignedTransaction, Transaction},
        tron,
    },
    serde_json::Value,
};

mod dto;

/// A wallet paired over a wallet-connect session. Answers are unwrapped into
/// the injected provider's shapes before leaving the adapter.
pub struct WalletConnect {
    rpc: rpc::Client,
}

impl WalletConnect {
    pub fn new(rpc: rpc::Client) -> Self {
        Self { rpc }
    }

    async fn object(
        &self,
        method: &'static str,
        transaction: &Transaction,
    ) -> Result<Value, Error> {
        let value: Value = self.rpc.call(method, [&transaction.0]).await?;
        match dto::unwrap(value) {
            value @ Value::Object(_) => Ok(value),
            other => Err(Error::UnexpectedResponse(format!("{method}: {other}"))),
        }
    }
}

#[async_trait::async_trait]
impl Wallet for WalletConnect {
    async fn account(&self) -> Result<tron::Address, Error> {
        let value: Value = self.rpc.call("tron_getAccount", rpc::NO_PARAMS).await?;
        let account = dto::account(value.clone())
            .ok_or_else(|| Error::UnexpectedResponse(format!("account: {value}")))?;
        account
            .parse()
            .map_err(|_| Error::UnexpectedResponse(format!("account: {account}")))
    }

    async fn sign_message(&self, message: &str) -> Result<String, Error> {
        let value: Value = self.rpc.call("tron_signMessage", [message]).await?;
        dto::signature(value.clone())
            .ok_or_else(|| Error::UnexpectedResponse(format!("signature: {value}")))
    }

    async fn sign_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<SignedTransaction, Error> {
        self.object("tron_signTransaction", transaction)
            .await
            .map(SignedTransaction)
    }

    async fn sign_and_send_transaction(&self, transaction: &Transaction) -> Result<Receipt, Error> {
        self.object("tron_signAndSendTransaction", transaction)
            .await
            .map(Receipt)
    }

    async fn disconnect(&self) -> Result<(), Error> {
        let _: Value = self.rpc.call("tron_disconnect", rpc::NO_PARAMS).await?;
        Ok(())
    }
}
