//! Routes an intent through the wallet in exactly one of two modes.
//!
//! ```text
//! Idle -> Building -> Signing -> Broadcasting -> Done   (sign-only)
//! Idle -> Building -> Signing -> Done                   (sign-and-send)
//!                  \-----------\-------------\-> Failed
//! ```
//!
//! Only one operation may be in flight per dispatcher. A call arriving while
//! another is running is rejected with [`Error::Busy`] before touching any
//! collaborator; it is never queued.

use {
    crate::{
        domain::{
            build::{self, BuildError},
            encode::{self, Call},
            intent::{TransferIntent, ValidationError},
            result::{self, OperationResult, SignedMessage},
            tron::{self, Sun},
        },
        infra::{metrics, node, node::Node, wallet, wallet::Wallet},
    },
    chrono::Utc,
    std::{
        str::FromStr,
        sync::{
            Arc,
            Mutex,
            atomic::{AtomicBool, Ordering},
        },
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The wallet signs, the gateway broadcasts through the node.
    #[default]
    SignOnly,
    /// The wallet signs and broadcasts in one step.
    SignAndSend,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::SignOnly => "sign-only",
            Mode::SignAndSend => "sign-and-send",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign-only" => Ok(Self::SignOnly),
            "sign-and-send" => Ok(Self::SignAndSend),
            _ => Err(UnknownMode(s.to_owned())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown dispatch mode {0:?}")]
pub struct UnknownMode(String);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Building,
    Signing,
    Broadcasting,
    Done,
    Failed,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Building => "building",
            State::Signing => "signing",
            State::Broadcasting => "broadcasting",
            State::Done => "done",
            State::Failed => "failed",
        }
    }
}

pub struct Config {
    /// Upper bound on the resources a contract trigger may burn.
    pub fee_limit: Sun,
    /// Refuse native transfers exceeding the sender's balance before
    /// building them.
    pub check_balance: bool,
}

pub struct Dispatcher {
    node: Arc<dyn Node>,
    config: Config,
    busy: AtomicBool,
    state: Mutex<State>,
}

impl Dispatcher {
    pub fn new(node: Arc<dyn Node>, config: Config) -> Self {
        Self {
            node,
            config,
            busy: AtomicBool::new(false),
            state: Mutex::new(State::Idle),
        }
    }

    /// The state of the most recent operation.
    pub fn state(&self) -> State {
        *self.state.lock().unwrap()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Builds, signs and submits the intent.
    ///
    /// A broadcast the chain did not accept is not an error: it yields an
    /// unsuccessful [`OperationResult`].
    pub async fn dispatch(
        &self,
        wallet: &dyn Wallet,
        intent: &TransferIntent,
        mode: Mode,
    ) -> Result<OperationResult, Error> {
        let _guard = self.acquire()?;
        metrics::dispatch(mode);
        tracing::debug!(mode = mode.as_str(), "dispatching");

        let result = self.run(wallet, intent, mode).await;
        match &result {
            Ok(result) => {
                self.transition(State::Done);
                metrics::result(result.success);
            }
            Err(err) => self.fail(err),
        }
        result
    }

    /// Asks the wallet to sign a message. Shares the busy flag with
    /// [`Self::dispatch`].
    pub async fn sign_message(
        &self,
        wallet: &dyn Wallet,
        signer: tron::Address,
        message: &str,
    ) -> Result<SignedMessage, Error> {
        let _guard = self.acquire()?;
        if message.is_empty() {
            let err = Error::Validation(ValidationError::EmptyMessage);
            self.fail(&err);
            return Err(err);
        }

        self.transition(State::Signing);
        match wallet.sign_message(message).await {
            Ok(signature) => {
                self.transition(State::Done);
                Ok(SignedMessage {
                    message: message.to_owned(),
                    signature,
                    signer,
                    timestamp: Utc::now(),
                })
            }
            Err(err) => {
                let err = Error::from(err);
                self.fail(&err);
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        wallet: &dyn Wallet,
        intent: &TransferIntent,
        mode: Mode,
    ) -> Result<OperationResult, Error> {
        self.transition(State::Building);
        let call = encode::encode(intent)?;
        if let Call::Native { from, amount, .. } = &call {
            if self.config.check_balance {
                let balance = self.node.balance(*from).await?;
                if balance < *amount {
                    return Err(ValidationError::InsufficientBalance {
                        balance,
                        required: *amount,
                    }
                    .into());
                }
            }
        }
        let transaction = build::build(self.node.as_ref(), &call, self.config.fee_limit).await?;

        self.transition(State::Signing);
        let signer = call.sender();
        match mode {
            Mode::SignOnly => {
                let signed = wallet.sign_transaction(&transaction).await?;
                self.transition(State::Broadcasting);
                let receipt = self.node.broadcast(&signed).await?;
                Ok(result::normalize(
                    transaction,
                    Some(signed),
                    receipt,
                    signer,
                    mode,
                ))
            }
            Mode::SignAndSend => {
                let receipt = wallet.sign_and_send_transaction(&transaction).await?;
                Ok(result::normalize(transaction, None, receipt, signer, mode))
            }
        }
    }

    fn acquire(&self) -> Result<Guard<'_>, Error> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Guard(&self.busy))
            .map_err(|_| {
                tracing::debug!("rejecting operation while another is in flight");
                metrics::busy();
                Error::Busy
            })
    }

    fn transition(&self, next: State) {
        let mut state = self.state.lock().unwrap();
        tracing::debug!(from = ?*state, to = ?next, "dispatch state");
        *state = next;
    }

    fn fail(&self, err: &Error) {
        self.transition(State::Failed);
        tracing::warn!(?err, "operation failed");
        metrics::dispatch_error(err.kind());
    }
}

/// Clears the busy flag when the operation ends, however it ends.
struct Guard<'a>(&'a AtomicBool);

impl Drop for Guard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("another operation is in flight")]
    Busy,
    #[error("no wallet connected")]
    NotConnected,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Provider(#[from] wallet::Error),
    #[error(transparent)]
    Node(#[from] node::Error),
}

impl Error {
    /// for instrumentization purposes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Busy => "Busy",
            Self::NotConnected => "NotConnected",
            Self::Validation(_) => "ValidationError",
            Self::Build(_) => "BuildError",
            Self::Provider(wallet::Error::UserCancelled(_)) => "UserCancelled",
            Self::Provider(_) => "ProviderError",
            Self::Node(_) => "NodeError",
        }
    }
}
