/**
 * Channel transport to the backend process.
 *
 * The desktop shell owns the receiving half and answers each request by
 * firing its oneshot reply. Everything in this crate talks to the backend
 * through the sending half via the `RemoteInvoker` trait.
 */
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::invoker::{InvokeError, RemoteInvoker};

/// Default depth of the request queue between client and shell.
pub const DEFAULT_BRIDGE_CAPACITY: usize = 32;

/// One in-flight backend call: the command, its named arguments, and the
/// slot the shell answers into.
#[derive(Debug)]
pub struct BridgeRequest {
    pub command: String,
    pub args: Value,
    pub reply: oneshot::Sender<Result<Value, InvokeError>>,
}

/// Sending half of the bridge. Cheap to clone; every clone feeds the same
/// request queue.
#[derive(Debug, Clone)]
pub struct BridgeInvoker {
    tx: mpsc::Sender<BridgeRequest>,
}

/// Create a connected bridge pair. The receiver goes to whatever hosts the
/// backend; the invoker goes to monitors and pass-through ops.
#[must_use]
pub fn channel(capacity: usize) -> (BridgeInvoker, mpsc::Receiver<BridgeRequest>) {
    let (tx, rx) = mpsc::channel(capacity);
    (BridgeInvoker { tx }, rx)
}

#[async_trait]
impl RemoteInvoker for BridgeInvoker {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, InvokeError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        debug!("bridge dispatch: {command}");

        let request = BridgeRequest {
            command: command.to_string(),
            args,
            reply: reply_tx,
        };

        self.tx
            .send(request)
            .await
            .map_err(|_| InvokeError::Transport(format!("bridge closed dispatching {command}")))?;

        reply_rx
            .await
            .map_err(|_| InvokeError::Transport(format!("reply dropped for {command}")))?
    }
}
