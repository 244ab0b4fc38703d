//! Pagination envelope for backend list responses.

use serde::{Deserialize, Serialize};

/// A page of results as returned by the backend's paginated endpoints.
///
/// Mirrors the backend's envelope exactly: `{content, totalPages,
/// totalElements, size, number}`. `number` is zero-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Total number of pages available.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// Requested page size.
    pub size: u32,
    /// Zero-based index of this page.
    pub number: u32,
}

impl<T> Page<T> {
    /// An empty page (used as a fallback when a fetch fails softly).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            size: 0,
            number: 0,
        }
    }

    /// One-based page number for display.
    #[must_use]
    pub const fn display_number(&self) -> u32 {
        self.number + 1
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Map the items on this page, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            size: self.size,
            number: self.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_camel_case() {
        let json = r#"{"content":[1,2,3],"totalPages":4,"totalElements":38,"size":10,"number":0}"#;
        let page: Page<i32> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_elements, 38);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.display_number(), 1);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Page {
            content: vec![1],
            total_pages: 2,
            total_elements: 11,
            size: 10,
            number: 1,
        };
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_map_preserves_envelope() {
        let page = Page {
            content: vec![1, 2],
            total_pages: 1,
            total_elements: 2,
            size: 10,
            number: 0,
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.content, vec![2, 4]);
        assert_eq!(mapped.total_elements, 2);
    }
}
