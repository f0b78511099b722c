//! Wallet-connect sessions relay answers from the paired wallet app, which
//! tend to come back wrapped in one or more envelopes.

use serde_json::Value;

/// Strips `wcResult` envelopes and `result` envelopes around objects or
/// strings. A boolean `result` is the receipt's own status and stays.
pub fn unwrap(mut value: Value) -> Value {
    loop {
        let envelope = match &value {
            Value::Object(map) if map.contains_key("wcResult") => "wcResult",
            Value::Object(map)
                if matches!(
                    map.get("result"),
                    Some(Value::Object(_) | Value::String(_))
                ) =>
            {
                "result"
            }
            _ => return value,
        };
        value = value[envelope].take();
    }
}

/// An account is either the address itself or `{"address": ...}`.
pub fn account(value: Value) -> Option<String> {
    field(value, "address")
}

/// A signature is either the hex string itself or `{"signature": ...}`.
pub fn signature(value: Value) -> Option<String> {
    field(value, "signature")
}

fn field(value: Value, name: &str) -> Option<String> {
    match unwrap(value) {
        Value::String(value) => Some(value),
        Value::Object(mut map) => match map.remove(name) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        },
        _ => None,
    }
}
