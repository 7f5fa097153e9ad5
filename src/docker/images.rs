use serde_json::json;

use super::data::{ImageDeleteItem, ImageSummary};
use super::invoker::RemoteInvoker;
use crate::error::Result;

/// List every image on the daemon, including intermediate layers.
///
/// # Errors
///
/// Will return `Err` if the backend call fails or the reply does not decode
/// as an image list.
pub async fn list(invoker: &dyn RemoteInvoker) -> Result<Vec<ImageSummary>> {
    let raw = invoker.invoke("get_docker_images", json!({})).await?;
    Ok(serde_json::from_value(raw)?)
}

/// Remove an image by name or id.
///
/// # Errors
///
/// Will return `Err` if the backend call fails or the reply does not decode
pub async fn remove(
    invoker: &dyn RemoteInvoker,
    image_name: &str,
    force: bool,
) -> Result<Vec<ImageDeleteItem>> {
    let raw = invoker
        .invoke(
            "delete_docker_image",
            json!({
                "imageName": image_name,
                "force": force,
            }),
        )
        .await?;
    Ok(serde_json::from_value(raw)?)
}

/// Pull an image from a registry by name. Per-layer progress is streamed
/// out-of-band by the backend under `stream_id`; the call resolves once the
/// pull is complete.
///
/// # Errors
///
/// Will return `Err` if the backend call fails
pub async fn pull(invoker: &dyn RemoteInvoker, image_name: &str, stream_id: &str) -> Result<()> {
    invoker
        .invoke(
            "add_docker_image_by_name",
            json!({
                "imageName": image_name,
                "uniqueId": stream_id,
            }),
        )
        .await?;
    Ok(())
}
