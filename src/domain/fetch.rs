//! Fetch - Page Requests and Results

use serde::{Deserialize, Serialize};

use crate::domain::record::Record;

/// One page request. `page` is zero based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    pub page: usize,
    pub page_size: usize,
    /// Ask the transport to skip any cached response
    #[serde(default)]
    pub bypass_cache: bool,
}

impl FetchRequest {
    /// Create a request; a zero page size is raised to 1
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            bypass_cache: false,
        }
    }

    /// Same request, with the cache bypass flag set
    pub fn bypassing_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }

    /// Index of the first row of this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// A successfully fetched page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub rows: Vec<Record>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_is_raised() {
        let request = FetchRequest::new(2, 0);
        assert_eq!(request.page_size, 1);
        assert_eq!(request.offset(), 2);
    }

    #[test]
    fn test_offset() {
        assert_eq!(FetchRequest::new(3, 20).offset(), 60);
        assert!(FetchRequest::new(0, 20).bypassing_cache().bypass_cache);
    }
}
