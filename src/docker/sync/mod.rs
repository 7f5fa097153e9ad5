pub mod config;
pub mod monitor;
pub mod snapshot;
pub mod subscription;

pub use config::SyncConfig;
pub use monitor::{MonitorEvents, ResourceMonitor, SyncState};
pub use snapshot::{FailureKind, FetchFailure, ResourceKind, ResourceSnapshot};
pub use subscription::{EventChannel, Subscription};
