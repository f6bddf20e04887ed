//! Wire model for the audit-trail control plane.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trail's configuration as returned by the control plane.
///
/// Only the attributes this tool reads are modeled; anything else in the
/// response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailConfiguration {
    /// Trail name, unique within the account/region.
    pub name: String,

    /// Region the trail was created in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_region: Option<String>,

    /// Whether audit events are also published to the event bus.
    /// The control plane omits this field when the integration has never
    /// been configured; absent means disabled.
    #[serde(default)]
    pub event_bus_enabled: bool,

    /// Whether the trail spans all regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_region: Option<bool>,

    /// Whether the trail is currently recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_logging: Option<bool>,

    /// Last configuration change, as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Patch body for a trail update. The event-bus flag is the only
/// attribute this tool mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTrailRequest {
    pub event_bus_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_event_bus_flag_means_disabled() {
        let config: TrailConfiguration = serde_json::from_value(serde_json::json!({
            "name": "analytics",
            "home_region": "us-east-1"
        }))
        .unwrap();

        assert_eq!(config.name, "analytics");
        assert!(!config.event_bus_enabled);
        assert_eq!(config.multi_region, None);
    }

    #[test]
    fn full_payload_round_trips() {
        let config: TrailConfiguration = serde_json::from_value(serde_json::json!({
            "name": "analytics",
            "home_region": "us-east-1",
            "event_bus_enabled": true,
            "multi_region": false,
            "is_logging": true,
            "updated_at": "2026-08-01T12:00:00Z"
        }))
        .unwrap();

        assert!(config.event_bus_enabled);
        assert_eq!(config.is_logging, Some(true));
        assert!(config.updated_at.is_some());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["event_bus_enabled"], serde_json::json!(true));
    }

    #[test]
    fn update_request_serializes_single_field() {
        let request = UpdateTrailRequest {
            event_bus_enabled: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({ "event_bus_enabled": true }));
    }
}
