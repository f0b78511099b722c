//! Turns a [`TransferIntent`] into the typed call the node can build a
//! transaction for.

use {
    crate::{
        domain::{
            intent::{Amount, Decimals, Function, TransferIntent, ValidationError},
            tron::{self, Sun, U256},
        },
        util::conv,
    },
    bigdecimal::BigDecimal,
    num::Signed,
    std::str::FromStr,
};

/// A validated call, ready to be turned into a transaction by the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Native {
        from: tron::Address,
        to: tron::Address,
        amount: Sun,
    },
    Contract(ContractCall),
}

impl Call {
    pub fn sender(&self) -> tron::Address {
        match self {
            Call::Native { from, .. } => *from,
            Call::Contract(call) => call.from,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    pub from: tron::Address,
    pub contract: tron::Address,
    pub function: Function,
    pub parameters: Vec<Parameter>,
    /// Native value sent along with the call, always zero for token calls.
    pub call_value: Sun,
}

/// One ABI encoded argument of a contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub abi_type: &'static str,
    pub value: String,
}

impl Parameter {
    pub fn address(address: tron::Address) -> Self {
        Self {
            abi_type: "address",
            value: address.to_string(),
        }
    }

    pub fn uint256(value: U256) -> Self {
        Self {
            abi_type: "uint256",
            value: value.to_string(),
        }
    }
}

/// The argument list of `transfer(address,uint256)` and
/// `approve(address,uint256)`.
pub fn parameters(recipient: tron::Address, amount: U256) -> Vec<Parameter> {
    vec![Parameter::address(recipient), Parameter::uint256(amount)]
}

/// Validates the intent and encodes its amount into base units.
pub fn encode(intent: &TransferIntent) -> Result<Call, ValidationError> {
    let from = address(&intent.sender, "sender")?;
    let to = address(&intent.recipient, "recipient")?;
    if from == to {
        return Err(ValidationError::SameAddress);
    }

    let Some(token) = &intent.token else {
        let Amount::Exact(amount) = &intent.amount else {
            return Err(ValidationError::UnlimitedNotAllowed);
        };
        let amount = native_amount(amount)?;
        if amount == Sun::default() {
            return Err(ValidationError::BelowSmallestUnit);
        }
        return Ok(Call::Native { from, to, amount });
    };

    let contract = address(&token.contract, "contract")?;
    let decimals = Decimals::new(token.decimals)?;
    let amount = match (&intent.amount, token.function) {
        (Amount::Exact(amount), _) => match token_amount(amount, decimals)? {
            amount if amount.is_zero() => return Err(ValidationError::BelowSmallestUnit),
            amount => amount,
        },
        (Amount::Unlimited, Function::Approve) => U256::MAX,
        (Amount::Unlimited, Function::Transfer) => {
            return Err(ValidationError::UnlimitedNotAllowed);
        }
    };

    Ok(Call::Contract(ContractCall {
        from,
        contract,
        function: token.function,
        parameters: parameters(to, amount),
        call_value: Sun::default(),
    }))
}

/// Converts a TRX amount into sun, truncating toward zero.
pub fn native_amount(amount: &str) -> Result<Sun, ValidationError> {
    Sun::from_trx(&positive(amount)?).ok_or(ValidationError::AmountOutOfRange)
}

/// Computes `floor(amount * 10^decimals)`.
pub fn token_amount(amount: &str, decimals: Decimals) -> Result<U256, ValidationError> {
    conv::decimal_to_base_units(&positive(amount)?, decimals.get())
        .ok_or(ValidationError::AmountOutOfRange)
}

/// Largest exponent accepted in scientific notation, in either direction.
const MAX_EXPONENT: u32 = 1024;

fn positive(amount: &str) -> Result<BigDecimal, ValidationError> {
    let trimmed = amount.trim();
    if let Some((_, exponent)) = trimmed.split_once(['e', 'E']) {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        let numeric = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
        if numeric && !digits.parse::<u32>().is_ok_and(|e| e <= MAX_EXPONENT) {
            return Err(ValidationError::AmountOutOfRange);
        }
    }
    let value = BigDecimal::from_str(trimmed)
        .map_err(|_| ValidationError::InvalidAmount(amount.to_owned()))?;
    if !value.is_positive() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(value)
}

fn address(value: &str, field: &'static str) -> Result<tron::Address, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|source| ValidationError::InvalidAddress { field, source })
}
