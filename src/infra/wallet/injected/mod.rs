use {
    super::{Error, Wallet, rpc},
    crate::domain::{
        transaction::{Receipt, SignedTransaction, Transaction},
        tron,
    },
    serde_json::Value,
};

mod dto;

/// A wallet injected into the browser (TronLink, Binance Web3 Wallet) whose
/// answers are already in the node's shapes.
pub struct Injected {
    rpc: rpc::Client,
}

impl Injected {
    pub fn new(rpc: rpc::Client) -> Self {
        Self { rpc }
    }
}

#[async_trait::async_trait]
impl Wallet for Injected {
    async fn account(&self) -> Result<tron::Address, Error> {
        let account: dto::Account = self
            .rpc
            .call("tron_getAccount", rpc::NO_PARAMS)
            .await?;
        Ok(account.address)
    }

    async fn sign_message(&self, message: &str) -> Result<String, Error> {
        self.rpc.call("tron_signMessage", [message]).await
    }

    async fn sign_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<SignedTransaction, Error> {
        let signed = self.rpc.call("tron_signTransaction", [&transaction.0]).await?;
        Ok(SignedTransaction(signed))
    }

    async fn sign_and_send_transaction(&self, transaction: &Transaction) -> Result<Receipt, Error> {
        let receipt = self
            .rpc
            .call("tron_signAndSendTransaction", [&transaction.0])
            .await?;
        Ok(Receipt(receipt))
    }

    async fn disconnect(&self) -> Result<(), Error> {
        let _: Value = self.rpc.call("tron_disconnect", rpc::NO_PARAMS).await?;
        Ok(())
    }
}
