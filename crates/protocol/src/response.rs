//! Response shapes, one per action family.
//!
//! These are pure data containers. Field names match the service exactly,
//! including the hyphenated `page-size`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{FactId, Timestamp};

/// One immutable recorded event.
///
/// The service has historically emitted capitalised field names (`Id`,
/// `Timestamp`, `Content`); both spellings are accepted on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Monotonic, sortable identity of the fact within its stream.
    #[serde(alias = "Id")]
    pub id: FactId,

    /// When the service recorded the fact.
    #[serde(alias = "Timestamp")]
    pub timestamp: Timestamp,

    /// Opaque payload supplied at append time.
    #[serde(alias = "Content", default)]
    pub content: Value,
}

/// Result of [`crate::Action::Append`] and [`crate::Action::Tail`]: the newest
/// fact in a stream and the stream's length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailResponse {
    pub aggregate: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    pub fact: Fact,

    /// Number of facts in the stream, including [`Self::fact`].
    pub total: u64,
}

/// Result of [`crate::Action::Read`]: a page of facts in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    pub aggregate: String,

    pub entity: String,

    /// Oldest first, starting after the requested origin. Never longer than
    /// [`Self::page_size`].
    #[serde(default, deserialize_with = "null_as_empty")]
    pub facts: Vec<Fact>,

    /// Number of facts in the whole stream.
    pub total: u64,

    #[serde(rename = "page-size")]
    pub page_size: u32,
}

impl ReadResponse {
    /// Returns `true` if the page holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Id of the last fact on this page: the origin for the next page.
    pub fn last_id(&self) -> Option<FactId> {
        self.facts.last().map(|fact| fact.id)
    }
}

/// Result of [`crate::Action::Scan`]: the entity names under an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub aggregate: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub entities: Vec<String>,

    pub total: u64,
}

impl ScanResponse {
    /// Returns `true` if `entity` is listed under this aggregate.
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }
}

/// Empty collections may arrive as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tail_response_decodes() {
        let response: TailResponse = serde_json::from_value(json!({
            "aggregate": "orders",
            "entity": "order-1",
            "fact": {
                "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
                "timestamp": "2021-06-01T12:30:45Z",
                "content": {"qty": 3}
            },
            "total": 1
        }))
        .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.entity.as_deref(), Some("order-1"));
        assert_eq!(response.fact.content, json!({"qty": 3}));
        assert_eq!(response.fact.id.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_tail_response_without_entity() {
        let response: TailResponse = serde_json::from_value(json!({
            "aggregate": "orders",
            "fact": {"id": "01ARZ3NDEKTSV4RRFFQ69G5FAV", "timestamp": "2021-06-01T12:30:45Z"},
            "total": 4
        }))
        .unwrap();

        assert!(response.entity.is_none());
        assert!(response.fact.content.is_null());
    }

    #[test]
    fn test_fact_accepts_capitalised_fields() {
        let fact: Fact = serde_json::from_value(json!({
            "Id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "Timestamp": "2021-06-01T12:30:45.5Z",
            "Content": "hello"
        }))
        .unwrap();

        assert_eq!(fact.content, json!("hello"));
    }

    #[test]
    fn test_read_response_cursor() {
        let response: ReadResponse = serde_json::from_value(json!({
            "aggregate": "orders",
            "entity": "order-1",
            "facts": [
                {"id": "01ARZ3NDEKTSV4RRFFQ69G5FAV", "timestamp": "2021-06-01T12:30:45Z", "content": 1},
                {"id": "01ARZ3NDEKTSV4RRFFQ69G5FAW", "timestamp": "2021-06-01T12:30:46Z", "content": 2}
            ],
            "total": 2,
            "page-size": 10
        }))
        .unwrap();

        assert_eq!(response.page_size, 10);
        assert_eq!(
            response.last_id().map(|id| id.to_string()).as_deref(),
            Some("01ARZ3NDEKTSV4RRFFQ69G5FAW")
        );
    }

    #[test]
    fn test_null_or_missing_facts_is_empty_page() {
        let missing: ReadResponse = serde_json::from_value(json!({
            "aggregate": "orders", "entity": "order-1", "total": 0, "page-size": 10
        }))
        .unwrap();
        assert!(missing.is_empty());
        assert!(missing.last_id().is_none());

        let null: ReadResponse = serde_json::from_value(json!({
            "aggregate": "orders", "entity": "order-1", "facts": null, "total": 0, "page-size": 10
        }))
        .unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_null_entities_is_empty_listing() {
        let response: ScanResponse = serde_json::from_value(json!({
            "aggregate": "orders", "entities": null, "total": 0
        }))
        .unwrap();
        assert!(response.entities.is_empty());
    }

    #[test]
    fn test_scan_response_contains() {
        let response: ScanResponse = serde_json::from_value(json!({
            "aggregate": "orders",
            "entities": ["order-1", "order-2"],
            "total": 2
        }))
        .unwrap();

        assert!(response.contains("order-2"));
        assert!(!response.contains("order-3"));
    }

    #[test]
    fn test_read_response_encodes_hyphenated_page_size() {
        let response = ReadResponse {
            aggregate: "orders".into(),
            entity: "order-1".into(),
            facts: Vec::new(),
            total: 0,
            page_size: 25,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["page-size"], json!(25));
    }
}
