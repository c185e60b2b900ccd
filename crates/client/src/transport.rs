//! The HTTPS transport shared by every call on one client.
//!
//! The transport has two states: uninitialized and ready. It becomes ready on
//! first use, on [`Transport::ensure_ready`], or at construction through
//! [`Transport::ready`], and never goes back. The build runs under a
//! [`OnceCell`], so callers racing on first use build it exactly once.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{FactTotemError, Result};

const USER_AGENT: &str = concat!("fact-totem-client/", env!("CARGO_PKG_VERSION"));

pub(crate) struct Transport {
    http: OnceCell<Client>,
    timeout: Option<Duration>,
}

impl Transport {
    /// An uninitialized transport; built on first use.
    pub(crate) fn lazy(timeout: Option<Duration>) -> Self {
        Self {
            http: OnceCell::new(),
            timeout,
        }
    }

    /// A transport that is already built.
    pub(crate) fn ready(timeout: Option<Duration>) -> Result<Self> {
        let client = build(timeout)?;
        Ok(Self {
            http: OnceCell::new_with(Some(client)),
            timeout,
        })
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.http.initialized()
    }

    /// Builds the transport unless it is already built.
    pub(crate) async fn ensure_ready(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }

    pub(crate) async fn get(&self) -> Result<&Client> {
        self.http
            .get_or_try_init(|| async { build(self.timeout) })
            .await
    }
}

/// rustls with the operating system's root store as the only trust anchors.
fn build(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .tls_built_in_root_certs(true)
        .user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    let client = builder
        .build()
        .map_err(|source| FactTotemError::TransportInit { source })?;
    debug!(?timeout, "Built fact totem HTTPS transport");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_transport_is_ready() {
        let transport = Transport::ready(Some(Duration::from_secs(5))).unwrap();
        assert!(transport.is_ready());
    }

    #[tokio::test]
    async fn test_lazy_transport_builds_on_first_use() {
        let transport = Transport::lazy(None);
        assert!(!transport.is_ready());

        transport.ensure_ready().await.unwrap();
        assert!(transport.is_ready());
    }

    #[tokio::test]
    async fn test_transport_is_built_once() {
        let transport = Transport::lazy(None);
        let first = transport.get().await.unwrap() as *const Client;
        transport.ensure_ready().await.unwrap();
        let second = transport.get().await.unwrap() as *const Client;
        assert_eq!(first, second);
    }
}
