use serde::{Deserialize, Serialize};

/// One page of a listing endpoint, normalized from either response shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingPage<T> {
    pub results: Vec<T>,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

impl<T> ListingPage<T> {
    pub fn empty(page: u32) -> Self {
        Self {
            results: Vec::new(),
            page,
            total_pages: None,
            total_results: None,
        }
    }

    /// Whether another page is expected after this one.
    ///
    /// An authoritative `total_pages` wins. Without it this is the approximate
    /// "received a full page" heuristic against the limit that was requested.
    pub fn has_more(&self, requested_limit: u32) -> bool {
        match self.total_pages {
            Some(total) => self.page < total,
            None => requested_limit > 0 && self.results.len() >= requested_limit as usize,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListingPage<U> {
        ListingPage {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(len: usize, page: u32, total_pages: Option<u32>) -> ListingPage<u32> {
        ListingPage {
            results: (0..len as u32).collect(),
            page,
            total_pages,
            total_results: None,
        }
    }

    #[test]
    fn test_has_more_prefers_total_pages() {
        // A short page still has more when the service says so
        assert!(page_of(3, 1, Some(4)).has_more(20));
        // A full page is the last one when page == total_pages
        assert!(!page_of(20, 4, Some(4)).has_more(20));
    }

    #[test]
    fn test_has_more_heuristic_without_total() {
        assert!(page_of(20, 1, None).has_more(20));
        assert!(!page_of(19, 1, None).has_more(20));
        assert!(!page_of(0, 1, None).has_more(0));
    }
}
