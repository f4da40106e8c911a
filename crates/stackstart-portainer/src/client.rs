use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use stackstart_core::{ApiError, Stack, StackApi, StackId};
use stackstart_settings::Settings;

/// Per-call timeout for reads.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Per-call timeout for start/stop, which the API answers only once the
/// containers have been acted on.
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the stack endpoints of the Portainer API.
pub struct PortainerClient {
    client: Client,
    api_base: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for PortainerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortainerClient")
            .field("api_base", &self.api_base)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl PortainerClient {
    /// Build a client for `base_url` (the API lives under `<base_url>/api`).
    ///
    /// A missing key is accepted here and reported by each call instead.
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        verify_tls: bool,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(
            &settings.base_url,
            Some(settings.api_key.clone()),
            settings.verify_tls,
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
            .ok_or(ApiError::MissingApiKey)
    }

    fn stack_url(&self, id: StackId) -> String {
        format!("{}/stacks/{id}", self.api_base)
    }

    /// Send a request and turn transport failures and non-2xx answers into
    /// [`ApiError`]s.
    async fn send(
        &self,
        request: RequestBuilder,
        url: &str,
        timeout: Duration,
    ) -> Result<Response, ApiError> {
        let response = request.timeout(timeout).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                format!("timed out after {timeout:?}")
            } else {
                e.to_string()
            };
            ApiError::Transport { url: url.to_string(), reason }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(response)
    }

    async fn post_action(
        &self,
        id: StackId,
        endpoint_id: i64,
        action: &str,
    ) -> Result<(), ApiError> {
        let key = self.api_key()?;
        let url = format!("{}/{action}", self.stack_url(id));
        let request = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .query(&[("endpointId", endpoint_id)]);
        self.send(request, &url, ACTION_TIMEOUT).await?;
        debug!(stack_id = id, endpoint_id, action, "stack action accepted");
        Ok(())
    }
}

#[async_trait]
impl StackApi for PortainerClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_stack(&self, id: StackId) -> Result<Stack, ApiError> {
        let key = self.api_key()?;
        let url = self.stack_url(id);
        let request = self.client.get(&url).header(API_KEY_HEADER, key);
        let response = self.send(request, &url, FETCH_TIMEOUT).await?;
        response.json::<Stack>().await.map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })
    }

    async fn start_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError> {
        self.post_action(id, endpoint_id, "start").await
    }

    async fn stop_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError> {
        self.post_action(id, endpoint_id, "stop").await
    }
}
