//! User intents: what the user asked for, before any validation.

use {
    crate::domain::tron::{self, Sun},
    std::fmt::{self, Display, Formatter},
};

/// A request to move value from the connected account to a recipient, either
/// as a native TRX transfer or through a token contract function.
#[derive(Clone, Debug)]
pub struct TransferIntent {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
    /// `None` moves the native coin.
    pub token: Option<TokenCall>,
}

/// The token contract function an intent invokes.
#[derive(Clone, Debug)]
pub struct TokenCall {
    pub contract: String,
    pub decimals: u32,
    pub function: Function,
}

/// The user entered amount, in whole units of the coin or token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Amount {
    /// A decimal string such as `"1.5"`.
    Exact(String),
    /// The largest representable allowance. Only meaningful for approvals.
    Unlimited,
}

/// Token contract functions taking `(address, uint256)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Transfer,
    Approve,
}

impl Function {
    /// The ABI signature passed to the contract trigger builder.
    pub fn signature(self) -> &'static str {
        match self {
            Function::Transfer => "transfer(address,uint256)",
            Function::Approve => "approve(address,uint256)",
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// Token decimals, within the range supported by the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decimals(u32);

impl Decimals {
    /// Used for token contracts not in the registry when nothing else is
    /// specified.
    pub const DEFAULT: Self = Self(6);
    pub const MAX: u32 = 18;

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::DecimalsOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A fungible token known to the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub symbol: String,
    pub contract: tron::Address,
    pub decimals: Decimals,
}

/// The registry of configured tokens.
#[derive(Clone, Debug, Default)]
pub struct Tokens(pub Vec<Token>);

impl Tokens {
    /// Well-known tokens on mainnet.
    pub fn mainnet() -> Self {
        let token = |symbol: &str, contract: &str, decimals: u32| Token {
            symbol: symbol.to_owned(),
            contract: contract.parse().expect("valid well-known token address"),
            decimals: Decimals(decimals),
        };
        Self(vec![
            token("USDT", "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t", 6),
            token("USDC", "TEkxiTehnzSmSe2XqrBj4w32RUN966rdz8", 6),
            token("WIN", "TLa2f6VPqDgRE67v1736s7bJ8Ray5wYjU7", 6),
            token("USDJ", "TN3W4H6rK2ce4vX9YnFQHwKENnHjoxb3m9", 18),
            token("JST", "TCFLL5dx5ZJdKnWuesXxi1VPwjLVmWZZy9", 18),
        ])
    }

    /// Looks a token up by symbol (case insensitive) or contract address.
    pub fn find(&self, symbol_or_contract: &str) -> Option<&Token> {
        let contract = symbol_or_contract.parse::<tron::Address>().ok();
        self.0.iter().find(|token| {
            token.symbol.eq_ignore_ascii_case(symbol_or_contract)
                || Some(token.contract) == contract
        })
    }
}

/// An intent was rejected before talking to any external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        source: tron::InvalidAddress,
    },
    #[error("sender and recipient must differ")]
    SameAddress,
    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("amount does not fit into the on-chain representation")]
    AmountOutOfRange,
    #[error("amount is smaller than one base unit")]
    BelowSmallestUnit,
    #[error("token decimals {0} outside of [0, 18]")]
    DecimalsOutOfRange(u32),
    #[error("unlimited amounts are only allowed for token approvals")]
    UnlimitedNotAllowed,
    #[error("unknown token {0:?}")]
    UnknownToken(String),
    #[error("insufficient balance: {balance} available, {required} required")]
    InsufficientBalance { balance: Sun, required: Sun },
    #[error("message must not be empty")]
    EmptyMessage,
}
