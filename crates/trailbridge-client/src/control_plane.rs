//! The control-plane boundary and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use trailbridge_core::{ToolConfig, TrailConfiguration, UpdateTrailRequest};
use url::Url;
use uuid::Uuid;

use crate::error::ClientError;

/// Management API of the audit-logging service.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Fetch the named trail's current configuration. Read-only.
    async fn get_trail(&self, name: &str) -> Result<TrailConfiguration, ClientError>;

    /// Request a configuration change for the named trail. The returned
    /// configuration reflects what the service actually applied, which is
    /// not guaranteed to match the request.
    async fn update_trail(
        &self,
        name: &str,
        request: UpdateTrailRequest,
    ) -> Result<TrailConfiguration, ClientError>;
}

/// HTTP implementation of [`ControlPlane`].
///
/// Issues exactly one request per operation. Retrying is the caller's
/// decision, and this tool never makes it.
#[derive(Debug)]
pub struct HttpControlPlane {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl HttpControlPlane {
    /// Build a client for the given endpoint and token.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(endpoint).map_err(|source| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: source.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "endpoint cannot carry a path".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// Build a client from tool configuration, resolving the endpoint and
    /// token through the configured environment indirection.
    pub fn from_config(config: &ToolConfig) -> Result<Self, ClientError> {
        let endpoint = config.resolve_endpoint()?;
        let token = config.resolve_token()?;
        Self::new(&endpoint, token)
    }

    fn trail_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        // Infallible: cannot_be_a_base was rejected in the constructor.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "trails", name]);
        }
        url
    }

    async fn read_trail_response(
        name: &str,
        response: reqwest::Response,
    ) -> Result<TrailConfiguration, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_string());
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::TrailNotFound(name.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClientError::AccessDenied(body))
            }
            _ => Err(ClientError::Rejected {
                status: status.as_u16(),
                message: body,
            }),
        }
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn get_trail(&self, name: &str) -> Result<TrailConfiguration, ClientError> {
        let url = self.trail_url(name);
        tracing::debug!(trail = name, %url, "fetching trail configuration");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("x-request-id", Uuid::new_v4().to_string())
            .send()
            .await?;

        Self::read_trail_response(name, response).await
    }

    async fn update_trail(
        &self,
        name: &str,
        request: UpdateTrailRequest,
    ) -> Result<TrailConfiguration, ClientError> {
        let url = self.trail_url(name);
        tracing::debug!(
            trail = name,
            event_bus_enabled = request.event_bus_enabled,
            %url,
            "updating trail configuration"
        );

        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .header("x-request-id", Uuid::new_v4().to_string())
            .json(&request)
            .send()
            .await?;

        Self::read_trail_response(name, response).await
    }
}
