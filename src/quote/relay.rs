//! Interpretation of the form relay's reply
//!
//! The relay answers with a JSON body whose shape varies: a plain `ok` flag,
//! a `_status` string, an `errors` list or a single `error`. Anything that
//! fails to parse is treated as an empty object.

use serde_json::Value;
use tracing::{info, warn};

/// Result of a relay POST as seen by the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Request delivered; send the customer to the thank-you page
    Accepted,
    /// Relay refused the request
    Rejected { status: u16, message: String },
}

impl RelayOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RelayOutcome::Accepted)
    }

    /// Text shown to the customer on failure
    pub fn user_message(&self) -> Option<String> {
        match self {
            RelayOutcome::Accepted => None,
            RelayOutcome::Rejected { status, message } => {
                Some(format!("Submission failed ({}). {}", status, message))
            }
        }
    }
}

/// Decide whether a relay reply means the request was delivered.
///
/// Each property is read on its own; a field of an unexpected type is
/// ignored without hiding the others.
pub fn interpret_reply(status: u16, body: &str) -> RelayOutcome {
    let raw: Value = serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Default::default()));

    let ok_flag = raw.get("ok").is_some_and(is_truthy);
    let status_flag = raw.get("_status").and_then(Value::as_str) == Some("success");
    if (200..300).contains(&status) || ok_flag || status_flag {
        info!(status, "relay accepted submission");
        return RelayOutcome::Accepted;
    }

    let message = raw
        .pointer("/errors/0/message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .or_else(|| raw.get("error").filter(|e| is_truthy(e)).map(value_text))
        .unwrap_or_else(|| raw.to_string());
    let message = if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    };

    warn!(status, %message, "relay rejected submission");
    RelayOutcome::Rejected { status, message }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
