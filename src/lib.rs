//! Client-side core for a Docker desktop app: a polling synchronization
//! engine, typed event streams, and thin pass-through commands, all issued
//! to the backend process over an RPC bridge.

pub mod docker;
pub mod error;
pub mod format;
