use serde_json::{Value, json};

use super::data::{ContainerCreated, ContainerSummary};
use super::invoker::RemoteInvoker;
use crate::error::Result;

/// Everything needed to create a container. Resource limits of zero mean
/// "unlimited", matching what the daemon does with absent limits.
#[derive(Clone, Debug, Default)]
pub struct CreateContainer {
    pub name: String,
    pub image: String,
    /// CPU ceiling as a percentage of one core.
    pub cpu_percent_limit: i64,
    /// Memory ceiling in MiB; sent to the daemon in bytes.
    pub memory_limit_mib: i64,
    pub command: Option<String>,
}

/// List all containers known to the daemon, running or not.
///
/// # Errors
///
/// Will return `Err` if the backend call fails or the reply does not decode
/// as a container list.
pub async fn list(invoker: &dyn RemoteInvoker) -> Result<Vec<ContainerSummary>> {
    let raw = invoker.invoke("get_docker_containers", json!({})).await?;
    Ok(serde_json::from_value(raw)?)
}

/// Full inspect payload for one container, left undecoded: the caller picks
/// the handful of fields it wants to show.
///
/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn details(invoker: &dyn RemoteInvoker, container_id: &str) -> Result<Value> {
    let raw = invoker
        .invoke(
            "get_docker_container_details",
            json!({ "containerId": container_id }),
        )
        .await?;
    Ok(raw)
}

/// # Errors
///
/// Will return `Err` if the backend call fails or the reply does not decode
pub async fn create(invoker: &dyn RemoteInvoker, spec: &CreateContainer) -> Result<ContainerCreated> {
    let raw = invoker
        .invoke(
            "create_docker_container",
            json!({
                "name": spec.name,
                "image": spec.image,
                "cpuPercentageLimit": spec.cpu_percent_limit,
                "memoryLimit": spec.memory_limit_mib * 1024 * 1024,
                "command": spec.command,
            }),
        )
        .await?;
    Ok(serde_json::from_value(raw)?)
}

/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn start(invoker: &dyn RemoteInvoker, container_id: &str) -> Result<()> {
    invoker
        .invoke(
            "start_docker_container",
            json!({ "containerId": container_id }),
        )
        .await?;
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn stop(invoker: &dyn RemoteInvoker, container_id: &str) -> Result<()> {
    invoker
        .invoke(
            "stop_docker_container",
            json!({ "containerId": container_id }),
        )
        .await?;
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn restart(invoker: &dyn RemoteInvoker, container_id: &str) -> Result<()> {
    invoker
        .invoke(
            "restart_docker_container",
            json!({ "containerId": container_id }),
        )
        .await?;
    Ok(())
}

/// Remove a container. `force` kills a running container first; `volumes`
/// and `links` extend the removal to attached volumes and links.
///
/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn remove(
    invoker: &dyn RemoteInvoker,
    container_id: &str,
    force: bool,
    volumes: bool,
    links: bool,
) -> Result<()> {
    invoker
        .invoke(
            "delete_docker_container",
            json!({
                "containerId": container_id,
                "force": force,
                "volumes": volumes,
                "links": links,
            }),
        )
        .await?;
    Ok(())
}

/// Hook a container up for live stdio. Output is streamed out-of-band by
/// the backend under `stream_id`; this call only establishes the tunnel.
///
/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn attach(invoker: &dyn RemoteInvoker, container_id: &str, stream_id: &str) -> Result<()> {
    invoker
        .invoke(
            "set_container_up_for_live_stdio",
            json!({
                "containerId": container_id,
                "uniqueId": stream_id,
            }),
        )
        .await?;
    Ok(())
}
