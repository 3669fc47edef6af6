//! Wire types for the worker message protocol.
//!
//! Every message carries a request id; responses echo the id of the request
//! they answer. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ConversionRequest;
use crate::utils::ConverterResult;

/// One request on the message boundary, correlated by `id`.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub id: String,
    pub payload: RequestPayload,
}

/// The request body, keyed by the wire `type` tag.
#[derive(Debug, Clone)]
pub enum RequestPayload {
    Load(LoadPayload),
    Convert(ConversionRequest),
    /// Any unrecognized `type` tag, kept verbatim for the error response
    Unknown(String),
    /// A recognized `type` whose body failed to decode; the reason is kept
    /// so the error response still correlates on the sender's id
    Invalid(String),
}

/// Body of a `load` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPayload {
    /// Raw engine payload (bytecode in the original protocol)
    #[serde(default)]
    pub engine: Vec<u8>,
}

impl RequestEnvelope {
    pub fn new(id: impl Into<String>, payload: RequestPayload) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }

    /// Decodes one JSON message.
    ///
    /// Only unparseable JSON is an `Err` here; anything that yields a value
    /// becomes an envelope, so the answer can carry the sender's id.
    pub fn from_json(raw: &str) -> ConverterResult<Self> {
        Ok(Self::from_value(serde_json::from_str(raw)?))
    }

    /// Decodes a loosely-typed message value.
    ///
    /// Unknown `type` tags are preserved as [`RequestPayload::Unknown`] and
    /// malformed bodies as [`RequestPayload::Invalid`], so the handler
    /// answers with the protocol's tagged error, correlated on the parsed
    /// id, instead of a deserialization failure. A message with no id
    /// correlates as "0".
    pub fn from_value(value: Value) -> Self {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("0")
            .to_string();
        let kind = value.get("type").and_then(Value::as_str).map(str::to_string);

        let payload = match kind.as_deref() {
            None => RequestPayload::Invalid("message has no `type` field".to_string()),
            Some("load") => serde_json::from_value(value)
                .map(RequestPayload::Load)
                .unwrap_or_else(invalid_body),
            Some("convert") => serde_json::from_value(value)
                .map(RequestPayload::Convert)
                .unwrap_or_else(invalid_body),
            Some(other) => RequestPayload::Unknown(other.to_string()),
        };
        Self { id, payload }
    }
}

fn invalid_body(e: serde_json::Error) -> RequestPayload {
    RequestPayload::Invalid(e.to_string())
}

/// One response on the message boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse {
    /// Emitted exactly once on worker startup, before any request is served
    Ready { id: String },
    /// The engine accepted its `load` payload
    Loaded { id: String },
    /// A conversion completed; `zip` marks multi-image archive output
    Finished {
        id: String,
        output: Vec<u8>,
        zip: bool,
    },
    /// Any failure, with a human-readable message
    Error { id: String, error: String },
}

impl WorkerResponse {
    /// The request id this response answers.
    pub fn id(&self) -> &str {
        match self {
            Self::Ready { id }
            | Self::Loaded { id }
            | Self::Finished { id, .. }
            | Self::Error { id, .. } => id,
        }
    }
}
