//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A normalized request for a page of results (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number, starting at 1.
    pub page: u32,
    /// The number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// The first page number.
    pub const FIRST_PAGE: u32 = 1;
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Normalizes raw caller input into a valid page request.
    ///
    /// A page below 1 becomes 1. A page size outside `1..=100` becomes 10.
    #[must_use]
    pub fn normalized(page: i64, page_size: i64) -> Self {
        let page = if page < 1 {
            Self::FIRST_PAGE
        } else {
            u32::try_from(page).unwrap_or(u32::MAX)
        };
        let page_size = match u32::try_from(page_size) {
            Ok(size) if (1..=Self::MAX_SIZE).contains(&size) => size,
            _ => Self::DEFAULT_SIZE,
        };
        Self { page, page_size }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::FIRST_PAGE,
            page_size: Self::DEFAULT_SIZE,
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageInfo {
    /// The current page number (1-indexed).
    pub current_page: u32,
    /// The number of items per page.
    pub page_size: u32,
    /// The total number of live items across all pages.
    pub total_items: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl PageInfo {
    /// Creates page metadata for a request and a total count.
    #[must_use]
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let size = u64::from(request.page_size);
        let total_pages = if size > 0 { total_items.div_ceil(size) } else { 0 };

        Self {
            current_page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        let req = PageRequest::normalized(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn test_page_request_page_below_one_falls_back() {
        assert_eq!(PageRequest::normalized(0, 10).page, 1);
        assert_eq!(PageRequest::normalized(-4, 10).page, 1);
    }

    #[test]
    fn test_page_request_size_out_of_range_falls_back() {
        assert_eq!(PageRequest::normalized(1, 0).page_size, 10);
        assert_eq!(PageRequest::normalized(1, -1).page_size, 10);
        assert_eq!(PageRequest::normalized(1, 101).page_size, 10);
        assert_eq!(PageRequest::normalized(1, 100).page_size, 100);
        assert_eq!(PageRequest::normalized(1, 1).page_size, 1);
    }

    #[test]
    fn test_page_info_total_pages() {
        let info = PageInfo::new(PageRequest::normalized(1, 10), 25);
        assert_eq!(info.total_pages, 3);

        let exact = PageInfo::new(PageRequest::normalized(1, 5), 25);
        assert_eq!(exact.total_pages, 5);

        let empty = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }
}
