//! Pagination types for API requests
//!
//! The API is JSON:API flavored: list endpoints take `page[size]`,
//! `page[number]`, and `filter[...]` query parameters and return
//! `meta.total-count` / `meta.total-pages` alongside the data array.

use serde::{Deserialize, Serialize};

/// Maximum page size accepted by the API.
/// Using this as the default minimizes the number of requests.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Query state for one paginated fetch.
///
/// The paginator is the only mutator: it increments `page_number` as pages
/// complete and shrinks `page_size` when the server reports a timeout.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Requested items per page (>= 1)
    pub page_size: u32,
    /// Page number, 1-indexed
    pub page_number: u32,
    /// Server-side `filter[...]` parameters
    pub filters: Vec<(String, String)>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(MAX_PAGE_SIZE)
    }
}

impl PageQuery {
    /// Create a query starting at page 1 with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            page_number: 1,
            filters: Vec::new(),
        }
    }

    /// Add a server-side filter, e.g. `filter("organization_id", "42")`.
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    /// Render as URL query parameters.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page[size]".to_string(), self.page_size.to_string()),
            ("page[number]".to_string(), self.page_number.to_string()),
        ];
        for (name, value) in &self.filters {
            params.push((format!("filter[{name}]"), value.clone()));
        }
        params
    }
}

/// Pagination metadata returned by list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages
    #[serde(default, rename = "total-count")]
    pub total_count: Option<u64>,

    /// Total number of pages at the requested page size
    #[serde(default, rename = "total-pages")]
    pub total_pages: Option<u32>,

    /// Page this response covers
    #[serde(default, rename = "current-page")]
    pub current_page: Option<u32>,
}

/// Top-level JSON:API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    /// Payload: a record array for list endpoints, a single record otherwise
    pub data: T,

    /// Pagination metadata (list endpoints only)
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Resource;

    #[test]
    fn test_query_params_rendering() {
        let query = PageQuery::new(100).filter("organization_id", "42");
        let params = query.to_query_params();

        assert!(params.contains(&("page[size]".to_string(), "100".to_string())));
        assert!(params.contains(&("page[number]".to_string(), "1".to_string())));
        assert!(params.contains(&("filter[organization_id]".to_string(), "42".to_string())));
    }

    #[test]
    fn test_page_size_floor_is_one() {
        let query = PageQuery::new(0);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_default_uses_max_page_size() {
        let query = PageQuery::default();
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
        assert_eq!(query.page_number, 1);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_meta_parses_kebab_case_keys() {
        let meta: PageMeta = serde_json::from_str(
            r#"{ "total-count": 250, "total-pages": 3, "current-page": 1 }"#,
        )
        .unwrap();
        assert_eq!(meta.total_count, Some(250));
        assert_eq!(meta.total_pages, Some(3));
    }

    #[test]
    fn test_meta_fields_are_optional() {
        let meta: PageMeta = serde_json::from_str("{}").unwrap();
        assert!(meta.total_count.is_none());
    }

    #[test]
    fn test_document_list_envelope() {
        let doc: Document<Vec<Resource>> = serde_json::from_str(
            r#"{
                "data": [
                    { "id": "1", "type": "organizations", "attributes": { "name": "Acme" } }
                ],
                "meta": { "total-count": 1, "total-pages": 1 }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].name(), Some("Acme"));
        assert_eq!(doc.meta.unwrap().total_count, Some(1));
    }

    #[test]
    fn test_document_single_record_envelope() {
        let doc: Document<Resource> = serde_json::from_str(
            r#"{ "data": { "id": "9", "type": "flexible-assets" } }"#,
        )
        .unwrap();

        assert_eq!(doc.data.id, "9");
        assert!(doc.meta.is_none());
    }
}
