//! Paginated list envelope shared by every backend list endpoint, and the
//! client-side pager that walks it.
//!
//! Request: `pageNumber`, `pageSize`, optional `filter` query parameters.
//! Response: `{ "value": { "data": [...], "totalCount": n, "pageCount": n } }`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// First page number the backend accepts.
pub const FIRST_PAGE: u32 = 1;

/// Default page size when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters for a paginated list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub page_number: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page_number: FIRST_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

impl ListRequest {
    #[must_use]
    pub fn page(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(FIRST_PAGE),
            page_size: page_size.max(1),
            filter: None,
        }
    }

    /// Request a single page large enough to hold every option of a select.
    #[must_use]
    pub fn all() -> Self {
        Self::page(FIRST_PAGE, 1000)
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page_count: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total_count: 0,
            page_count: 0,
        }
    }
}

/// `{ "value": Page<T> }`: the list response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListEnvelope<T> {
    pub value: Page<T>,
}

/// `{ "value": T }`: the detail response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValueEnvelope<T> {
    pub value: T,
}

/// Tracks where a list view is within a paginated collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_number: u32,
    page_size: u32,
    total_count: u64,
    page_count: u32,
}

impl Pager {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_number: FIRST_PAGE,
            page_size: page_size.max(1),
            total_count: 0,
            page_count: 0,
        }
    }

    /// Jump to `page_number` (clamped to the first page).
    #[must_use]
    pub fn at(mut self, page_number: u32) -> Self {
        self.page_number = page_number.max(FIRST_PAGE);
        self
    }

    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub const fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Request for the page the pager currently points at.
    #[must_use]
    pub fn request(&self, filter: Option<String>) -> ListRequest {
        ListRequest::page(self.page_number, self.page_size).with_filter(filter)
    }

    /// Record the totals a response reported. If the collection shrank
    /// below the current page, the pager falls back to the last page.
    pub fn observe<T>(&mut self, page: &Page<T>) {
        self.total_count = page.total_count;
        self.page_count = page.page_count;
        if self.page_count > 0 && self.page_number > self.page_count {
            self.page_number = self.page_count;
        }
    }

    #[must_use]
    pub const fn can_next(&self) -> bool {
        self.page_number < self.page_count
    }

    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.page_number > FIRST_PAGE
    }

    /// Advance one page. Returns `false` when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.page_number += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.page_number -= 1;
            true
        } else {
            false
        }
    }

    /// Human-readable position, e.g. `page 2/5 (43 total)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "page {}/{} ({} total)",
            self.page_number,
            self.page_count.max(1),
            self.total_count
        )
    }
}

/// Filter the rows already on screen while the filtered request is in flight.
///
/// Case-insensitive substring match against whatever text `haystack` extracts
/// from a row. An empty query keeps every row.
#[must_use]
pub fn filter_local<'a, T, F>(items: &'a [T], query: &str, haystack: F) -> Vec<&'a T>
where
    F: Fn(&T) -> String,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| haystack(item).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_envelope_parses_backend_shape() {
        let json = r#"{"value":{"data":[{"id":1},{"id":2}],"totalCount":12,"pageCount":6}}"#;
        let envelope: ListEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.value.data.len(), 2);
        assert_eq!(envelope.value.total_count, 12);
        assert_eq!(envelope.value.page_count, 6);
    }

    #[test]
    fn list_request_serializes_camel_case_without_empty_filter() {
        let request = ListRequest::page(2, 5).with_filter(Some("   ".into()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"pageNumber": 2, "pageSize": 5}));
    }

    #[test]
    fn pager_walks_forward_and_back() {
        let mut pager = Pager::new(10);
        pager.observe(&Page::<()> {
            data: vec![],
            total_count: 25,
            page_count: 3,
        });
        assert!(!pager.can_prev());
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.page_number(), 3);
        assert!(pager.prev());
        assert_eq!(pager.page_number(), 2);
        assert_eq!(pager.summary(), "page 2/3 (25 total)");
    }

    #[test]
    fn pager_clamps_when_collection_shrinks() {
        let mut pager = Pager::new(10).at(5);
        pager.observe(&Page::<()> {
            data: vec![],
            total_count: 12,
            page_count: 2,
        });
        assert_eq!(pager.page_number(), 2);
        assert_eq!(pager.request(None).page_number, 2);
    }

    #[test]
    fn filter_local_is_case_insensitive() {
        let names = vec!["Vanda coerulea".to_string(), "Phalaenopsis".to_string()];
        let hits = filter_local(&names, "VANDA", Clone::clone);
        assert_eq!(hits, vec![&names[0]]);
        assert_eq!(filter_local(&names, "", Clone::clone).len(), 2);
    }
}
