/**
 * Typed views over the payloads the daemon returns.
 *
 * Field names follow the Docker Engine API, so everything derives from the
 * raw JSON with explicit renames. Snapshots travel opaque through the sync
 * engine; these decode on demand at the display edge.
 */
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::format::human_size;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ContainerSummary {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "ImageID", default)]
    pub image_id: String,
    #[serde(rename = "Command", default)]
    pub command: String,
    #[serde(rename = "Created", default)]
    pub created: i64,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl ContainerSummary {
    /// First name the daemon reports, without the leading slash it prefixes
    /// to every container name.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.names
            .first()
            .map_or("", |name| name.strip_prefix('/').unwrap_or(name))
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created, 0).single()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageSummary {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "ParentId", default)]
    pub parent_id: String,
    #[serde(rename = "RepoTags", default)]
    pub repo_tags: Vec<String>,
    #[serde(rename = "Created", default)]
    pub created: i64,
    #[serde(rename = "Size", default)]
    pub size: i64,
    #[serde(rename = "Containers", default)]
    pub containers: i64,
}

impl ImageSummary {
    #[must_use]
    pub fn display_size(&self) -> String {
        human_size(u64::try_from(self.size).unwrap_or(0))
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created, 0).single()
    }
}

/// Daemon and host details behind `get_docker_daemon_info`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DaemonInfo {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "OSType", default)]
    pub os_type: String,
    #[serde(rename = "KernelVersion", default)]
    pub kernel_version: String,
    #[serde(rename = "ServerVersion", default)]
    pub server_version: String,
    #[serde(rename = "OperatingSystem", default)]
    pub operating_system: String,
    #[serde(rename = "Architecture", default)]
    pub architecture: String,
    #[serde(rename = "MemTotal", default)]
    pub mem_total: i64,
    #[serde(rename = "NCPU", default)]
    pub n_cpu: i64,
    #[serde(rename = "Images", default)]
    pub images: i64,
    #[serde(rename = "Containers", default)]
    pub containers: i64,
    #[serde(rename = "SwapLimit", default)]
    pub swap_limit: bool,
    #[serde(rename = "IPv4Forwarding", default)]
    pub ipv4_forwarding: bool,
}

impl DaemonInfo {
    #[must_use]
    pub fn display_memory(&self) -> String {
        human_size(u64::try_from(self.mem_total).unwrap_or(0))
    }
}

/// Reply to a container creation request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ContainerCreated {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Warnings", default)]
    pub warnings: Vec<String>,
}

/// One line of a `delete_docker_image` reply: each layer is either untagged
/// or fully deleted.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageDeleteItem {
    #[serde(rename = "Untagged", default)]
    pub untagged: Option<String>,
    #[serde(rename = "Deleted", default)]
    pub deleted: Option<String>,
}
