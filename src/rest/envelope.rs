//! Lightspeed error envelopes.
//!
//! When a request fails, Lightspeed answers with a JSON body like:
//!
//! ```json
//! {
//!     "httpCode": "401",
//!     "httpMessage": "Unauthorized",
//!     "message": "Invalid access token.",
//!     "errorClass": "Exception"
//! }
//! ```
//!
//! The code is normally a string; numbers are accepted too.

use serde::Deserialize;
use serde_json::Value;

/// A parsed Lightspeed error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// HTTP status reported inside the body.
    #[serde(deserialize_with = "code_from_value")]
    pub http_code: u16,
    /// Status text, e.g. `"Unauthorized"`.
    #[serde(default)]
    pub http_message: Option<String>,
    /// Human readable error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server-side exception class.
    #[serde(default)]
    pub error_class: Option<String>,
}

/// How the controller reacts to an error envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The access token expired: refresh, then retry.
    Auth,
    /// Rate limited or rejected for validation: wait longer, then retry.
    Throttled,
    /// Anything else: log, wait, retry.
    Other,
}

impl ErrorEnvelope {
    /// Parses an error envelope from a response body.
    ///
    /// Returns `None` if the body has no usable `httpCode`.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        body.get("httpCode")?;
        Self::deserialize(body).ok()
    }

    /// Classifies the envelope by its reported code.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self.http_code {
            401 => ErrorKind::Auth,
            422 | 429 => ErrorKind::Throttled,
            _ => ErrorKind::Other,
        }
    }

    /// Returns the most descriptive text in the envelope.
    #[must_use]
    pub fn description(&self) -> &str {
        self.message
            .as_deref()
            .or(self.http_message.as_deref())
            .unwrap_or("")
    }
}

impl std::fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.http_code)?;
        if let Some(class) = &self.error_class {
            write!(f, " {class}")?;
        }
        let description = self.description();
        if !description.is_empty() {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

fn code_from_value<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let code = match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    code.ok_or_else(|| serde::de::Error::custom(format!("invalid httpCode: {value}")))
}
