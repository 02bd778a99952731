//! Line framing for the message stream
//!
//! Each request and reply is one JSON object per line. A request may carry
//! an `"id"` of any JSON type; it is echoed on the matching reply.

use crate::error::HostError;
use scholar_analyzer::{Message, Reply};
use serde::Serialize;
use serde_json::Value;

/// Reply with the request id attached
#[derive(Debug, Serialize)]
pub struct ReplyEnvelope {
    /// Id from the request, omitted when the request had none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// The reply itself
    #[serde(flatten)]
    pub reply: Reply,
}

impl ReplyEnvelope {
    /// Attach `id` to `reply`
    pub fn new(id: Option<Value>, reply: Reply) -> Self {
        Self { id, reply }
    }

    /// Encode as a single line without the trailing newline
    pub fn to_line(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A decoded request line
#[derive(Debug)]
pub struct Request {
    /// Id to echo, if the line was a JSON object carrying one
    pub id: Option<Value>,
    /// The message, or why it could not be read
    pub message: Result<Message, HostError>,
}

/// Decode one line
///
/// The id is recovered even when the rest of the message is invalid, so the
/// error reply can still be correlated.
pub fn decode(line: &str) -> Request {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return Request {
                id: None,
                message: Err(HostError::InvalidMessage(e.to_string())),
            }
        }
    };

    let id = value.get("id").cloned();
    let message = serde_json::from_value(value).map_err(|e| HostError::InvalidMessage(e.to_string()));
    Request { id, message }
}
