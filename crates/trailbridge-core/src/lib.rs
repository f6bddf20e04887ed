//! Shared types for Trailbridge: the audit-trail wire model and the tool
//! configuration loaded from `trailbridge.yaml`.

pub mod config;
pub mod trail;

pub use config::{ConfigError, ToolConfig};
pub use trail::{TrailConfiguration, UpdateTrailRequest};
