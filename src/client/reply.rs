//! Search reply decoding
//!
//! The two backends answer in different shapes:
//!
//! - pass-through: `{ "results": [...], "caption": "..." }`, both optional
//! - catalog: `{ "success", "products", "hasMore", "page", "totalResults" }`

use serde::Deserialize;

use super::ClientError;
use crate::types::SearchResultItem;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReply {
    #[serde(default)]
    results: Option<Vec<SearchResultItem>>,
    #[serde(default)]
    products: Option<Vec<SearchResultItem>>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    has_more: Option<bool>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    total_results: Option<usize>,
}

/// A decoded search reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReply {
    pub items: Vec<SearchResultItem>,
    /// Image description generated upstream; empty strings become `None`
    pub caption: Option<String>,
    pub has_more: Option<bool>,
    pub page: Option<u32>,
    pub total_results: Option<usize>,
}

impl SearchReply {
    pub fn from_slice(body: &[u8]) -> Result<Self, ClientError> {
        let wire: WireReply =
            serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(Self {
            items: wire.results.or(wire.products).unwrap_or_default(),
            caption: wire.caption.filter(|c| !c.is_empty()),
            has_more: wire.has_more,
            page: wire.page,
            total_results: wire.total_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_passthrough_shape() {
        let reply = SearchReply::from_slice(
            br#"{"caption":"brown leather boots","results":[{"id":"1","title":"Boots","price":"EUR 40","image":"","url":"https://e/1"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.items.len(), 1);
        assert_eq!(reply.items[0].title, "Boots");
        assert_eq!(reply.caption.as_deref(), Some("brown leather boots"));
        assert_eq!(reply.has_more, None);
    }

    #[test]
    fn decodes_catalog_shape() {
        let reply = SearchReply::from_slice(
            br#"{"success":true,"products":[{"id":"a"},{"id":"b"}],"hasMore":true,"page":2,"totalResults":32}"#,
        )
        .unwrap();
        assert_eq!(reply.items.len(), 2);
        assert_eq!(reply.has_more, Some(true));
        assert_eq!(reply.page, Some(2));
        assert_eq!(reply.total_results, Some(32));
    }

    #[test]
    fn missing_fields_are_empty() {
        let reply = SearchReply::from_slice(br#"{"caption":""}"#).unwrap();
        assert!(reply.items.is_empty());
        assert!(reply.caption.is_none());
    }

    #[test]
    fn non_json_is_decode_error() {
        assert!(matches!(
            SearchReply::from_slice(b"<html>"),
            Err(ClientError::Decode(_))
        ));
    }
}
