//! The request envelope.
//!
//! One envelope shape serves all four actions; which fields are meaningful
//! depends on [`Request::action`]. Optional fields are left off the wire when
//! unset, empty or zero, so `entity: ""` and a missing entity encode
//! identically. The constructors normalise such values to `None` up front.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Action;

/// A single call to the fact totem service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The operation requested.
    pub action: Action,

    /// Aggregate the entity (or, for [`Action::Scan`], the listing) belongs to.
    pub aggregate: String,

    /// Entity stream within the aggregate. Unused by [`Action::Scan`].
    #[serde(default, skip_serializing_if = "is_blank")]
    pub entity: Option<String>,

    /// Payload of the fact to append. Only meaningful for [`Action::Append`].
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,

    /// Exclusive read cursor: a fact id, or absent to read from the start.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub origin: Option<String>,

    /// Maximum number of facts to return from a read.
    #[serde(rename = "page-size", default, skip_serializing_if = "is_zero")]
    pub page_size: Option<u32>,
}

impl Request {
    /// Builds an [`Action::Append`] request.
    pub fn append(aggregate: impl Into<String>, entity: impl Into<String>, content: Value) -> Self {
        Self {
            content,
            entity: non_empty(entity.into()),
            ..Self::bare(Action::Append, aggregate)
        }
    }

    /// Builds an [`Action::Tail`] request.
    pub fn tail(aggregate: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            entity: non_empty(entity.into()),
            ..Self::bare(Action::Tail, aggregate)
        }
    }

    /// Builds an [`Action::Read`] request for up to `page_size` facts after
    /// `origin`.
    pub fn read(
        aggregate: impl Into<String>,
        entity: impl Into<String>,
        origin: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            entity: non_empty(entity.into()),
            origin: non_empty(origin.into()),
            page_size: (page_size > 0).then_some(page_size),
            ..Self::bare(Action::Read, aggregate)
        }
    }

    /// Builds an [`Action::Scan`] request.
    pub fn scan(aggregate: impl Into<String>) -> Self {
        Self::bare(Action::Scan, aggregate)
    }

    fn bare(action: Action, aggregate: impl Into<String>) -> Self {
        Self {
            action,
            aggregate: aggregate.into(),
            entity: None,
            content: Value::Null,
            origin: None,
            page_size: None,
        }
    }
}

// An empty string or zero is never sent, however the envelope was built.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_zero(value: &Option<u32>) -> bool {
    value.map_or(true, |v| v == 0)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
