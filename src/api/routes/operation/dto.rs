use {
    crate::domain::{
        dispatch::Mode,
        gateway,
        intent::{Amount, ValidationError},
        result::OperationResult,
        tron,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    serde_with::{DisplayFromStr, serde_as},
};

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transfer {
    pub recipient: String,
    /// Decimal amount in whole TRX or whole tokens.
    pub amount: String,
    /// Symbol or contract address. Absent for TRX.
    pub token: Option<String>,
    /// Decimals of a contract missing from the registry.
    pub decimals: Option<u32>,
    #[serde(default)]
    #[serde_as(as = "DisplayFromStr")]
    pub mode: Mode,
}

impl Transfer {
    pub fn into_domain(self) -> gateway::Transfer {
        let decimals = self.decimals;
        gateway::Transfer {
            recipient: self.recipient,
            amount: self.amount,
            token: self.token.map(|token| gateway::TokenRef { token, decimals }),
            mode: self.mode,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Approval {
    pub spender: String,
    pub token: String,
    pub decimals: Option<u32>,
    pub amount: Option<String>,
    /// Grants the maximum allowance. Excludes `amount`.
    #[serde(default)]
    pub unlimited: bool,
    #[serde(default)]
    #[serde_as(as = "DisplayFromStr")]
    pub mode: Mode,
}

impl Approval {
    pub fn into_domain(self) -> Result<gateway::Approval, ValidationError> {
        let amount = match (self.amount, self.unlimited) {
            (None, true) => Amount::Unlimited,
            (Some(amount), false) => Amount::Exact(amount),
            (Some(amount), true) => return Err(ValidationError::InvalidAmount(amount)),
            (None, false) => return Err(ValidationError::InvalidAmount(String::new())),
        };
        Ok(gateway::Approval {
            spender: self.spender,
            amount,
            token: gateway::TokenRef {
                token: self.token,
                decimals: self.decimals,
            },
            mode: self.mode,
        })
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    original_transaction: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    signed_transaction: Option<Value>,
    broadcast_result: Value,
    transaction_id: Option<String>,
    success: bool,
    timestamp: DateTime<Utc>,
    signer: tron::Address,
    #[serde_as(as = "DisplayFromStr")]
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<BroadcastError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastError {
    code: Option<String>,
    message: Option<String>,
    description: String,
}

impl Operation {
    pub fn from_domain(result: OperationResult) -> Self {
        let error = result.failure().map(|failure| BroadcastError {
            description: failure.to_string(),
            code: failure.code,
            message: failure.message,
        });
        Self {
            original_transaction: result.original_transaction.0,
            signed_transaction: result.signed_transaction.map(|signed| signed.0),
            broadcast_result: result.broadcast_result.0,
            transaction_id: result.transaction_id,
            success: result.success,
            timestamp: result.timestamp,
            signer: result.signer,
            mode: result.mode,
            error,
        }
    }
}
