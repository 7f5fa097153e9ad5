use serde_json::Value;

use crate::docker::data::{ContainerSummary, DaemonInfo, ImageSummary};
use crate::docker::invoker::InvokeError;
use crate::error::Result;

/// Which daemon resource a monitor polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Containers,
    Images,
    DaemonInfo,
}

impl ResourceKind {
    /// Backend command that lists this resource. Command names are fixed by
    /// the backend's dispatch table.
    #[must_use]
    pub const fn list_command(&self) -> &'static str {
        match self {
            Self::Containers => "get_docker_containers",
            Self::Images => "get_docker_images",
            Self::DaemonInfo => "get_docker_daemon_info",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Containers => write!(f, "containers"),
            Self::Images => write!(f, "images"),
            Self::DaemonInfo => write!(f, "daemon-info"),
        }
    }
}

/// One fetched state payload. The payload stays raw JSON through the sync
/// engine; callers decode through the typed accessors when they want shape
/// guarantees.
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub kind: ResourceKind,
    pub payload: Value,
}

impl ResourceSnapshot {
    /// # Errors
    ///
    /// Will return `Err` if the payload does not decode as a container list
    pub fn containers(&self) -> Result<Vec<ContainerSummary>> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the payload does not decode as an image list
    pub fn images(&self) -> Result<Vec<ImageSummary>> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the payload does not decode as daemon info
    pub fn daemon_info(&self) -> Result<DaemonInfo> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

/// Class of a fetch failure, for subscribers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The bridge was unreachable or the reply never came back.
    Transport,
    /// The daemon received the request and rejected it.
    Backend,
    /// The payload arrived but did not match the expected shape.
    Parse,
}

/// A fetch failure as delivered on a monitor's failure stream. Never raised;
/// always published.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
    /// The backend-defined rejection value when one exists, forwarded
    /// verbatim so the UI can show whatever the daemon said.
    pub cause: Value,
}

impl FetchFailure {
    #[must_use]
    pub fn from_invoke(err: &InvokeError) -> Self {
        match err {
            InvokeError::Transport(msg) => Self {
                kind: FailureKind::Transport,
                message: msg.clone(),
                cause: Value::String(msg.clone()),
            },
            InvokeError::Rejected(value) => Self {
                kind: FailureKind::Backend,
                message: err.message(),
                cause: value.clone(),
            },
        }
    }

    #[must_use]
    pub fn from_decode(err: &serde_json::Error) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: err.to_string(),
            cause: Value::Null,
        }
    }
}
