/// Shared types used across the codebase
use serde::{Deserialize, Deserializer};

use crate::config;

/// Pagination window parsed from `limit`/`offset` query parameters.
///
/// The limit is clamped to the configured page-size ceiling so a public
/// caller cannot request an unbounded result set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let max = config::config().api.max_page_size;
        Self {
            limit: limit.map(|l| l.clamp(1, max)),
            offset: offset.map(|o| o.max(0)),
        }
    }

    /// LIMIT value to bind, falling back to the configured default
    pub fn limit_or_default(&self) -> i64 {
        self.limit
            .unwrap_or_else(|| config::config().api.default_page_size)
    }

    /// OFFSET value to bind
    pub fn offset_or_zero(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

/// Deserializer for fields that distinguish "absent" from "explicitly null".
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>` field: absent stays `None`, `null` becomes
/// `Some(None)`, and a value becomes `Some(Some(v))`. Update payloads use
/// this for nullable columns that a PUT can clear (category, end dates).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        category_id: Option<Option<Uuid>>,
    }

    #[test]
    fn absent_field_is_none() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.category_id.is_none());
    }

    #[test]
    fn null_field_is_some_none() {
        let p: Payload = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(p.category_id, Some(None));
    }

    #[test]
    fn value_field_is_some_some() {
        let id = Uuid::new_v4();
        let p: Payload =
            serde_json::from_str(&format!(r#"{{"category_id": "{}"}}"#, id)).unwrap();
        assert_eq!(p.category_id, Some(Some(id)));
    }

    #[test]
    fn pagination_clamps_limit() {
        let p = Pagination::new(Some(100_000), Some(-5));
        assert!(p.limit.unwrap() <= crate::config::config().api.max_page_size);
        assert_eq!(p.offset_or_zero(), 0);
    }
}
