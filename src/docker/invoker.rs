use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call, split at the dispatch boundary: either
/// the request never reached the daemon bridge, or the backend answered
/// with its own rejection value.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The request could not be dispatched or the reply channel died.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend received the request and rejected it. The payload is the
    /// backend-defined error value, forwarded untouched.
    #[error("backend rejected request: {0}")]
    Rejected(Value),
}

impl InvokeError {
    /// Best-effort human-readable message for a rejection value.
    ///
    /// The backend encodes failures as objects like
    /// `{"error": "DOCKER_RESPONSE_SERVER_ERROR", "error_msg": "..."}`;
    /// prefer `error_msg`, fall back to the `error` tag, then to the raw
    /// JSON text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport(msg) => msg.clone(),
            Self::Rejected(value) => value
                .get("error_msg")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map_or_else(|| value.to_string(), std::string::ToString::to_string),
        }
    }
}

/// Asynchronous request/response channel to the backend process.
///
/// One call per backend operation: `command` names the operation, `args` is
/// a JSON object of named arguments (empty object when the command takes
/// none). The transport behind this seam is not this crate's concern.
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, InvokeError>;
}
