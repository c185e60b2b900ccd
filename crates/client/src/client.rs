//! HTTPS implementation of [`EventStore`].

use async_trait::async_trait;
use fact_totem_protocol::{Action, EventStore, ReadResponse, Request, ScanResponse, TailResponse};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{FactTotemError, Result};
use crate::transport::Transport;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Client for a fact totem service.
///
/// Every call POSTs one [`Request`] envelope to the configured URL with the
/// configured bearer token and decodes the action's response type. Nothing is
/// cached and nothing is retried.
///
/// The client is `Send + Sync`; share it behind an `Arc` to call it from many
/// tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use fact_totem_client::{ClientConfig, EventStore, FactTotemClient};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FactTotemClient::connect(ClientConfig::from_env()?)?;
///
/// let appended = client.append("orders", "order-1", json!({"qty": 3})).await?;
/// let page = client.read("orders", "order-1", "", 50).await?;
/// assert!(page.facts.len() as u64 <= appended.total);
/// # Ok(())
/// # }
/// ```
pub struct FactTotemClient {
    config: ClientConfig,
    transport: Transport,
}

impl FactTotemClient {
    /// Creates a client whose transport is built on first use.
    pub fn new(config: ClientConfig) -> Self {
        let transport = Transport::lazy(config.timeout());
        Self { config, transport }
    }

    /// Creates a client with its transport already built, surfacing any
    /// transport construction failure here instead of on the first call.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let transport = Transport::ready(config.timeout())?;
        Ok(Self { config, transport })
    }

    /// Creates a lazily-connected client from `FACT_TOTEM_*` environment
    /// variables. See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Builds the transport if it has not been built yet. Once built, the
    /// transport is reused for the lifetime of the client.
    pub async fn refresh(&self) -> Result<()> {
        self.transport.ensure_ready().await
    }

    /// Returns `true` once the transport has been built.
    pub fn is_ready(&self) -> bool {
        self.transport.is_ready()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the bearer token used by subsequent calls.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.config.set_token(token)
    }

    /// Appends any serialisable `content`. Fails with
    /// [`FactTotemError::Encode`], before anything is sent, if `content` has
    /// no JSON form.
    pub async fn append_as<T>(&self, aggregate: &str, entity: &str, content: &T) -> Result<TailResponse>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_value(content).map_err(|source| FactTotemError::Encode {
            action: Action::Append,
            source,
        })?;
        self.append(aggregate, entity, content).await
    }

    #[instrument(skip_all, fields(action = %request.action, aggregate = %request.aggregate))]
    async fn call<R: DeserializeOwned>(&self, request: &Request) -> Result<R> {
        let action = request.action;
        let payload = serde_json::to_vec(request)
            .map_err(|source| FactTotemError::Encode { action, source })?;
        let authorization = self.config.authorization()?;
        let http = self.transport.get().await?;

        let response = http
            .post(self.config.url().clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .header(AUTHORIZATION, authorization)
            .body(payload)
            .send()
            .await
            .map_err(|source| FactTotemError::Transport { action, source })?;

        let status = response.status();
        let body = response.text().await;
        debug!(status = status.as_u16(), "Fact totem responded");

        if status != StatusCode::OK {
            // The status is the error; a body that failed to arrive is reported empty.
            return Err(status_error(action, status, body.unwrap_or_default()));
        }

        let body = body.map_err(|source| FactTotemError::Transport { action, source })?;
        serde_json::from_str(&body).map_err(|source| FactTotemError::Decode { action, source })
    }
}

/// `reason` is the canonical phrase for the code; the phrase on the server's
/// status line is not available through the transport.
fn status_error(action: Action, status: StatusCode, body: String) -> FactTotemError {
    FactTotemError::Status {
        action,
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    }
}

impl std::fmt::Debug for FactTotemClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactTotemClient")
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[async_trait]
impl EventStore for FactTotemClient {
    type Error = FactTotemError;

    async fn append(&self, aggregate: &str, entity: &str, content: Value) -> Result<TailResponse> {
        self.call(&Request::append(aggregate, entity, content)).await
    }

    async fn tail(&self, aggregate: &str, entity: &str) -> Result<TailResponse> {
        self.call(&Request::tail(aggregate, entity)).await
    }

    async fn read(
        &self,
        aggregate: &str,
        entity: &str,
        origin: &str,
        max_count: u32,
    ) -> Result<ReadResponse> {
        self.call(&Request::read(aggregate, entity, origin, max_count))
            .await
    }

    async fn scan(&self, aggregate: &str) -> Result<ScanResponse> {
        self.call(&Request::scan(aggregate)).await
    }
}
