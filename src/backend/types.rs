//! Wire types exchanged with the remote search endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::SearchType;

/// One request to the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Cleaned search term
    pub search_term: String,

    /// `ABN`, `ACN` or `NAME`
    pub search_type: SearchType,

    /// 1-based page, only sent for server-side pagination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,

    /// Page size, only sent for server-side pagination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(search_term: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            search_term: search_term.into(),
            search_type,
            page_number: None,
            page_size: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page_number: usize, page_size: usize) -> Self {
        self.page_number = Some(page_number);
        self.page_size = Some(page_size);
        self
    }
}

/// Envelope returned by the search endpoint
///
/// `success == false` is a business-level failure, distinct from a transport
/// error. `data` is left as raw JSON: it may be null, a single object, or an
/// array, and is only interpreted by the result normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Total match count when the endpoint paginates server-side
    #[serde(default, alias = "total", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl SearchResponse {
    /// Successful response carrying `data`
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data,
            message: None,
            total_count: None,
        }
    }

    /// Business failure with an optional endpoint message
    #[must_use]
    pub fn failed(message: Option<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message,
            total_count: None,
        }
    }

    #[must_use]
    pub fn with_total_count(mut self, total_count: usize) -> Self {
        self.total_count = Some(total_count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_paging_for_client_side() {
        let request = SearchRequest::new("51824753556", SearchType::Abn);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"searchTerm": "51824753556", "searchType": "ABN"})
        );

        let paged = request.with_page(2, 10);
        let value = serde_json::to_value(&paged).unwrap();
        assert_eq!(value["pageNumber"], 2);
        assert_eq!(value["pageSize"], 10);
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let response: SearchResponse =
            serde_json::from_value(json!({"success": false, "message": "no match"})).unwrap();
        assert!(!response.success);
        assert_eq!(response.data, Value::Null);
        assert_eq!(response.message.as_deref(), Some("no match"));

        let response: SearchResponse =
            serde_json::from_value(json!({"success": true, "data": [], "total": 42})).unwrap();
        assert_eq!(response.total_count, Some(42));
    }
}
