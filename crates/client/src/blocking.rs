//! Synchronous façade over [`FactTotemClient`].
//!
//! Each call blocks the calling thread for one round trip. The client owns a
//! small tokio runtime to drive the request, so it must not be created, used
//! or dropped from inside an async context; use [`FactTotemClient`] there.

use fact_totem_protocol::{EventStore, ReadResponse, ScanResponse, TailResponse};
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::client::FactTotemClient;
use crate::config::ClientConfig;
use crate::error::{FactTotemError, Result};

/// Blocking client for a fact totem service.
///
/// Safe to share between threads; concurrent calls each block only their own
/// thread.
pub struct BlockingClient {
    inner: FactTotemClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Creates a client whose transport is built on first use.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let runtime = runtime()?;
        Ok(Self {
            inner: FactTotemClient::new(config),
            runtime,
        })
    }

    /// Creates a client with its transport already built.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let runtime = runtime()?;
        let inner = {
            let _guard = runtime.enter();
            FactTotemClient::connect(config)?
        };
        Ok(Self { inner, runtime })
    }

    /// See [`EventStore::append`].
    pub fn append(&self, aggregate: &str, entity: &str, content: Value) -> Result<TailResponse> {
        self.runtime
            .block_on(self.inner.append(aggregate, entity, content))
    }

    /// See [`FactTotemClient::append_as`].
    pub fn append_as<T>(&self, aggregate: &str, entity: &str, content: &T) -> Result<TailResponse>
    where
        T: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.inner.append_as(aggregate, entity, content))
    }

    /// See [`EventStore::tail`].
    pub fn tail(&self, aggregate: &str, entity: &str) -> Result<TailResponse> {
        self.runtime.block_on(self.inner.tail(aggregate, entity))
    }

    /// See [`EventStore::read`].
    pub fn read(
        &self,
        aggregate: &str,
        entity: &str,
        origin: &str,
        max_count: u32,
    ) -> Result<ReadResponse> {
        self.runtime
            .block_on(self.inner.read(aggregate, entity, origin, max_count))
    }

    /// See [`EventStore::scan`].
    pub fn scan(&self, aggregate: &str) -> Result<ScanResponse> {
        self.runtime.block_on(self.inner.scan(aggregate))
    }

    /// See [`FactTotemClient::refresh`].
    pub fn refresh(&self) -> Result<()> {
        self.runtime.block_on(self.inner.refresh())
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.inner.set_token(token)
    }

    /// The async client behind this façade.
    pub fn get_ref(&self) -> &FactTotemClient {
        &self.inner
    }
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BlockingClient").field(&self.inner).finish()
    }
}

fn runtime() -> Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("fact-totem-blocking")
        .enable_all()
        .build()
        .map_err(|source| FactTotemError::Runtime { source })
}
