//! The event store port.
//!
//! [`EventStore`] is the seam consumers program against. `fact-totem-client`
//! implements it over HTTPS; tests and other adapters may implement it over
//! anything else.

use async_trait::async_trait;
use serde_json::Value;

use crate::{ReadResponse, ScanResponse, TailResponse};

/// Stores events for an `(aggregate, entity)` stream and retrieves them later.
///
/// Each method performs exactly one round trip. Only [`EventStore::append`]
/// has a durable side effect.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Error produced by this backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Appends one fact carrying `content` to the entity stream and returns it
    /// together with the stream's new total.
    async fn append(
        &self,
        aggregate: &str,
        entity: &str,
        content: Value,
    ) -> Result<TailResponse, Self::Error>;

    /// Returns the most recently appended fact and the stream's total without
    /// appending anything.
    async fn tail(&self, aggregate: &str, entity: &str) -> Result<TailResponse, Self::Error>;

    /// Returns up to `max_count` facts appended after `origin`, oldest first.
    ///
    /// An empty `origin` reads from the start of the stream.
    async fn read(
        &self,
        aggregate: &str,
        entity: &str,
        origin: &str,
        max_count: u32,
    ) -> Result<ReadResponse, Self::Error>;

    /// Lists every entity name known under `aggregate`.
    async fn scan(&self, aggregate: &str) -> Result<ScanResponse, Self::Error>;
}
