use {
    crate::{
        domain::{
            dispatch::{self, Dispatcher, Mode},
            intent::{
                Amount,
                Decimals,
                Function,
                TokenCall,
                Tokens,
                TransferIntent,
                ValidationError,
            },
            result::{OperationResult, SignedMessage},
            session::Session,
            signature::{self, Verification},
            transaction::SignedTransaction,
            tron::{self, Sun},
        },
        infra::{node::Node, recovery::Recover, wallet::Wallet},
    },
    std::sync::Arc,
};

/// A token named by symbol or contract address.
#[derive(Clone, Debug)]
pub struct TokenRef {
    pub token: String,
    /// Only used for contracts missing from the registry.
    pub decimals: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct Transfer {
    pub recipient: String,
    pub amount: String,
    /// `None` sends TRX.
    pub token: Option<TokenRef>,
    pub mode: Mode,
}

#[derive(Clone, Debug)]
pub struct Approval {
    pub spender: String,
    pub amount: Amount,
    pub token: TokenRef,
    pub mode: Mode,
}

/// Everything a user can do with their wallet through this service.
///
/// The wallet handle is owned here and handed to the session and the
/// dispatcher on every call.
pub struct Gateway {
    wallet: Arc<dyn Wallet>,
    node: Arc<dyn Node>,
    recover: Arc<dyn Recover>,
    tokens: Tokens,
    session: Session,
    dispatcher: Dispatcher,
}

impl Gateway {
    pub fn new(
        wallet: Arc<dyn Wallet>,
        node: Arc<dyn Node>,
        recover: Arc<dyn Recover>,
        tokens: Tokens,
        config: dispatch::Config,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(node.clone(), config),
            wallet,
            node,
            recover,
            tokens,
            session: Session::default(),
        }
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn account(&self) -> Option<tron::Address> {
        self.session.account()
    }

    /// Whether an operation is in flight, and the state of the latest one.
    pub fn status(&self) -> (bool, dispatch::State) {
        (self.dispatcher.is_busy(), self.dispatcher.state())
    }

    pub async fn probe(&self) -> Option<tron::Address> {
        self.session.probe(self.wallet.as_ref()).await
    }

    pub async fn connect(&self) -> Result<tron::Address, dispatch::Error> {
        Ok(self.session.connect(self.wallet.as_ref()).await?)
    }

    pub async fn disconnect(&self) -> Result<(), dispatch::Error> {
        Ok(self.session.disconnect(self.wallet.as_ref()).await?)
    }

    pub fn accounts_changed(
        &self,
        accounts: &[String],
    ) -> Result<Option<tron::Address>, dispatch::Error> {
        Ok(self.session.accounts_changed(accounts)?)
    }

    pub async fn balance(&self, address: &str) -> Result<Sun, dispatch::Error> {
        let address = address
            .parse()
            .map_err(|source| ValidationError::InvalidAddress {
                field: "account",
                source,
            })?;
        Ok(self.node.balance(address).await?)
    }

    pub async fn transfer(&self, transfer: Transfer) -> Result<OperationResult, dispatch::Error> {
        let sender = self.session.account().ok_or(dispatch::Error::NotConnected)?;
        let token = transfer
            .token
            .map(|token| self.resolve(&token, Function::Transfer))
            .transpose()?;
        let intent = TransferIntent {
            sender: sender.to_string(),
            recipient: transfer.recipient,
            amount: Amount::Exact(transfer.amount),
            token,
        };
        self.dispatcher
            .dispatch(self.wallet.as_ref(), &intent, transfer.mode)
            .await
    }

    pub async fn approve(&self, approval: Approval) -> Result<OperationResult, dispatch::Error> {
        let sender = self.session.account().ok_or(dispatch::Error::NotConnected)?;
        let intent = TransferIntent {
            sender: sender.to_string(),
            recipient: approval.spender,
            amount: approval.amount,
            token: Some(self.resolve(&approval.token, Function::Approve)?),
        };
        self.dispatcher
            .dispatch(self.wallet.as_ref(), &intent, approval.mode)
            .await
    }

    pub async fn sign_message(&self, message: &str) -> Result<SignedMessage, dispatch::Error> {
        let signer = self.session.account().ok_or(dispatch::Error::NotConnected)?;
        self.dispatcher
            .sign_message(self.wallet.as_ref(), signer, message)
            .await
    }

    pub fn verify_message(
        &self,
        message: &str,
        signer: &str,
        signature: Option<&str>,
    ) -> Result<Verification, ValidationError> {
        Ok(signature::verify_message(
            self.recover.as_ref(),
            message,
            signer_address(signer)?,
            signature,
        ))
    }

    pub fn verify_transaction(
        &self,
        transaction: &SignedTransaction,
        signer: &str,
    ) -> Result<Verification, ValidationError> {
        Ok(signature::verify_transaction(
            self.recover.as_ref(),
            transaction,
            signer_address(signer)?,
        ))
    }

    /// Registry tokens use their registered decimals. Unknown contracts use
    /// the given decimals or the default.
    fn resolve(
        &self,
        token: &TokenRef,
        function: Function,
    ) -> Result<TokenCall, ValidationError> {
        if let Some(known) = self.tokens.find(&token.token) {
            return Ok(TokenCall {
                contract: known.contract.to_string(),
                decimals: known.decimals.get(),
                function,
            });
        }
        if token.token.parse::<tron::Address>().is_err() {
            return Err(ValidationError::UnknownToken(token.token.clone()));
        }
        Ok(TokenCall {
            contract: token.token.clone(),
            decimals: token.decimals.unwrap_or(Decimals::DEFAULT.get()),
            function,
        })
    }
}

fn signer_address(signer: &str) -> Result<tron::Address, ValidationError> {
    signer
        .parse()
        .map_err(|source| ValidationError::InvalidAddress {
            field: "signer",
            source,
        })
}
