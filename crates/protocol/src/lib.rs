//! Wire contract for the fact totem event-log service.
//!
//! This crate contains every type that crosses the wire between a consumer and
//! a fact totem server, plus the [`EventStore`] port trait that infrastructure
//! crates implement. It defines *what* is exchanged; `fact-totem-client`
//! defines *how* it is carried.
//!
//! ## Architectural Layer
//!
//! **Protocol model.** This crate has no I/O dependencies. Every type here is
//! a transient data container that lives for exactly one request/response
//! round trip.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`action`] | The [`Action`] tag carried by every request |
//! | [`identifiers`] | [`FactId`] and [`Timestamp`] |
//! | [`request`] | The single [`Request`] envelope shared by all actions |
//! | [`response`] | [`Fact`], [`TailResponse`], [`ReadResponse`], [`ScanResponse`] |
//! | [`store`] | The [`EventStore`] port trait |

pub mod action;
pub mod identifiers;
pub mod request;
pub mod response;
pub mod store;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use action::{Action, UnknownAction};
pub use identifiers::{FactId, Timestamp};
pub use request::Request;
pub use response::{Fact, ReadResponse, ScanResponse, TailResponse};
pub use store::EventStore;
