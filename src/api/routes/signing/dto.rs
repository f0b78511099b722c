use {
    crate::domain::{
        result::SignedMessage,
        signature::{Reason, Verification},
        tron,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signed {
    message: String,
    signature: String,
    signer: tron::Address,
    timestamp: DateTime<Utc>,
}

impl Signed {
    pub fn from_domain(signed: SignedMessage) -> Self {
        Self {
            message: signed.message,
            signature: signed.signature,
            signer: signed.signer,
            timestamp: signed.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyMessage {
    pub message: String,
    pub signer: String,
    pub signature: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyTransaction {
    pub transaction: Value,
    pub signer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verified {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    /// The account that actually signed, when it is not the claimed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    recovered: Option<tron::Address>,
}

impl Verified {
    pub fn from_domain(verification: Verification) -> Self {
        match verification {
            Verification::Valid => Self {
                valid: true,
                reason: None,
                recovered: None,
            },
            Verification::Invalid(reason) => Self {
                valid: false,
                reason: Some(reason.as_str()),
                recovered: match reason {
                    Reason::SignerMismatch(recovered) => Some(recovered),
                    _ => None,
                },
            },
        }
    }
}
