//! `trailbridge enable-event-bus` command implementation.
//!
//! A linear read-then-write sequence: fetch the trail's current event-bus
//! flag, request it enabled, report what the service applied. The first
//! failure short-circuits into the shared reporting path.

use trailbridge_client::{ClientError, ControlPlane};
use trailbridge_core::UpdateTrailRequest;

/// Shown whenever the toggle could not be completed. The flag can always
/// be flipped by hand from the management console.
pub const REMEDIATION_HINT: &str = "\
NOTE: event-bus integration may need to be enabled from the management console.
Go to Audit Trails > select the trail > Edit > Event delivery > Event bus.";

/// Outcome of the toggle sequence.
#[derive(Debug)]
pub enum ToggleOutcome {
    /// The initial read failed; no update was attempted.
    ReadFailed(ClientError),

    /// The read succeeded but the update was not applied.
    UpdateFailed { before: bool, error: ClientError },

    /// Both calls completed. `after` is what the service reports it
    /// applied, which is the value to trust over the request.
    Succeeded { before: bool, after: bool },
}

/// Read the trail's current flag, then request it enabled. Each call is
/// issued at most once; there is no retry.
pub async fn toggle_event_bus(client: &dyn ControlPlane, trail: &str) -> ToggleOutcome {
    let before = match client.get_trail(trail).await {
        Ok(config) => config.event_bus_enabled,
        Err(error) => return ToggleOutcome::ReadFailed(error),
    };

    let request = UpdateTrailRequest {
        event_bus_enabled: true,
    };
    match client.update_trail(trail, request).await {
        Ok(config) => ToggleOutcome::Succeeded {
            before,
            after: config.event_bus_enabled,
        },
        Err(error) => ToggleOutcome::UpdateFailed { before, error },
    }
}

/// Render the report for an outcome. Every error variant lands in the same
/// shape: the error message verbatim, then the console hint.
pub fn render_report(trail: &str, outcome: &ToggleOutcome) -> String {
    let mut out = String::new();

    match outcome {
        ToggleOutcome::ReadFailed(error) => {
            out.push_str(&format!("Error: {error}\n"));
            out.push('\n');
            out.push_str(REMEDIATION_HINT);
        }
        ToggleOutcome::UpdateFailed { before, error } => {
            out.push_str(&format!(
                "Current event-bus status for '{trail}': {before}\n"
            ));
            out.push_str("Attempting to enable event-bus delivery...\n");
            out.push_str(&format!("Error: {error}\n"));
            out.push('\n');
            out.push_str(REMEDIATION_HINT);
        }
        ToggleOutcome::Succeeded { before, after } => {
            out.push_str(&format!(
                "Current event-bus status for '{trail}': {before}\n"
            ));
            out.push_str("Attempting to enable event-bus delivery...\n");
            out.push_str(&format!("Success! Event-bus delivery enabled: {after}"));
        }
    }

    out
}

/// Run the toggle and print its report.
pub async fn run(client: &dyn ControlPlane, trail: &str) {
    let outcome = toggle_event_bus(client, trail).await;
    println!("{}", render_report(trail, &outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trailbridge_core::TrailConfiguration;

    /// Control plane with canned responses. Each response can be consumed
    /// once, so a retry would show up as a missing-response panic as well
    /// as in the call counters.
    struct MockControlPlane {
        get_response: Mutex<Option<Result<TrailConfiguration, ClientError>>>,
        update_response: Mutex<Option<Result<TrailConfiguration, ClientError>>>,
        get_calls: AtomicUsize,
        update_calls: AtomicUsize,
    }

    impl MockControlPlane {
        fn new(
            get: Result<TrailConfiguration, ClientError>,
            update: Option<Result<TrailConfiguration, ClientError>>,
        ) -> Self {
            Self {
                get_response: Mutex::new(Some(get)),
                update_response: Mutex::new(update),
                get_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ControlPlane for MockControlPlane {
        async fn get_trail(&self, _name: &str) -> Result<TrailConfiguration, ClientError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.get_response
                .lock()
                .unwrap()
                .take()
                .expect("get_trail called more than once")
        }

        async fn update_trail(
            &self,
            _name: &str,
            _request: UpdateTrailRequest,
        ) -> Result<TrailConfiguration, ClientError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.update_response
                .lock()
                .unwrap()
                .take()
                .expect("update_trail called more than once")
        }
    }

    fn trail(event_bus_enabled: bool) -> TrailConfiguration {
        TrailConfiguration {
            name: "analytics".to_string(),
            home_region: Some("us-east-1".to_string()),
            event_bus_enabled,
            multi_region: None,
            is_logging: Some(true),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn enables_a_disabled_trail() {
        let client = MockControlPlane::new(Ok(trail(false)), Some(Ok(trail(true))));

        let outcome = toggle_event_bus(&client, "analytics").await;
        assert!(matches!(
            outcome,
            ToggleOutcome::Succeeded {
                before: false,
                after: true
            }
        ));
        assert_eq!(client.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.update_calls.load(Ordering::SeqCst), 1);

        let report = render_report("analytics", &outcome);
        assert!(report.contains("Current event-bus status for 'analytics': false"));
        assert!(report.contains("Success! Event-bus delivery enabled: true"));
        assert!(!report.contains("NOTE:"));
    }

    #[tokio::test]
    async fn already_enabled_trail_is_idempotent() {
        let client = MockControlPlane::new(Ok(trail(true)), Some(Ok(trail(true))));

        let outcome = toggle_event_bus(&client, "analytics").await;
        assert!(matches!(
            outcome,
            ToggleOutcome::Succeeded {
                before: true,
                after: true
            }
        ));

        let report = render_report("analytics", &outcome);
        assert!(report.contains("status for 'analytics': true"));
        assert!(report.contains("enabled: true"));
    }

    #[tokio::test]
    async fn read_failure_skips_the_update() {
        let client = MockControlPlane::new(
            Err(ClientError::TrailNotFound("analytics".to_string())),
            None,
        );

        let outcome = toggle_event_bus(&client, "analytics").await;
        assert!(matches!(outcome, ToggleOutcome::ReadFailed(_)));
        assert_eq!(client.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.update_calls.load(Ordering::SeqCst), 0);

        let report = render_report("analytics", &outcome);
        assert!(report.contains("Error: trail 'analytics' not found"));
        assert!(report.contains(REMEDIATION_HINT));
    }

    #[tokio::test]
    async fn update_failure_still_reports_the_read_value() {
        let client = MockControlPlane::new(
            Ok(trail(false)),
            Some(Err(ClientError::Rejected {
                status: 400,
                message: "event_bus_enabled is not a recognized attribute".to_string(),
            })),
        );

        let outcome = toggle_event_bus(&client, "analytics").await;
        assert!(matches!(
            outcome,
            ToggleOutcome::UpdateFailed { before: false, .. }
        ));

        let report = render_report("analytics", &outcome);
        assert!(report.contains("Current event-bus status for 'analytics': false"));
        assert!(report.contains("Error: control plane returned status 400"));
        assert!(report.contains(REMEDIATION_HINT));
    }

    #[tokio::test]
    async fn service_may_decline_the_flag_without_erroring() {
        // The service answers 200 but reports the flag still off. The
        // report must show the applied value, not the requested one.
        let client = MockControlPlane::new(Ok(trail(false)), Some(Ok(trail(false))));

        let outcome = toggle_event_bus(&client, "analytics").await;
        assert!(matches!(
            outcome,
            ToggleOutcome::Succeeded {
                before: false,
                after: false
            }
        ));

        let report = render_report("analytics", &outcome);
        assert!(report.contains("Success! Event-bus delivery enabled: false"));
    }
}
