//! Fact totem HTTPS client.
//!
//! Implements the [`fact_totem_protocol::EventStore`] trait against a fact
//! totem service: a single HTTPS endpoint that accepts a JSON
//! [`fact_totem_protocol::Request`] envelope by `POST` and answers with the
//! action's response shape.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Authentication, transport construction, serialisation
//! and status handling all live here. The protocol crate sees none of it.
//!
//! ## Transport
//!
//! The HTTPS transport trusts only the operating system's root certificate
//! store. It is built once per client, either eagerly with
//! [`FactTotemClient::connect`] or on first use after [`FactTotemClient::new`],
//! and reused for every call. Every request carries
//! `Authorization: Bearer <token>`; tokens are never refreshed automatically.
//!
//! ## Observability
//!
//! Calls run inside `tracing` spans tagged with the action and aggregate.
//! Installing a subscriber is left to the application.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
mod transport;

pub use blocking::BlockingClient;
pub use client::FactTotemClient;
pub use config::ClientConfig;
pub use error::{FactTotemError, Result};

pub use fact_totem_protocol::{
    Action, EventStore, Fact, FactId, ReadResponse, Request, ScanResponse, TailResponse,
    Timestamp,
};
