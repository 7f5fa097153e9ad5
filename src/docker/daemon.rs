use serde_json::json;

use super::data::DaemonInfo;
use super::invoker::RemoteInvoker;
use crate::error::Result;

/// Fetch daemon and host details (versions, architecture, counts, limits).
///
/// # Errors
///
/// Will return `Err` if the backend call fails or the reply does not decode
/// as daemon info.
pub async fn info(invoker: &dyn RemoteInvoker) -> Result<DaemonInfo> {
    let raw = invoker.invoke("get_docker_daemon_info", json!({})).await?;
    Ok(serde_json::from_value(raw)?)
}
