//! Pagination extractor.

use roster_core::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for pagination.
///
/// Values are kept as raw strings so that an unparseable value falls back to
/// the default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Items per page, 1 to 100
    #[param(value_type = Option<i64>, example = 10)]
    pub page_size: Option<String>,
}

impl PaginationQuery {
    /// Returns the raw page number, defaulting to the first page.
    #[must_use]
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), i64::from(PageRequest::FIRST_PAGE))
    }

    /// Returns the raw page size, defaulting to [`PageRequest::DEFAULT_SIZE`].
    #[must_use]
    pub fn page_size(&self) -> i64 {
        parse_or(self.page_size.as_deref(), i64::from(PageRequest::DEFAULT_SIZE))
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::normalized(query.page(), query.page_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> PaginationQuery {
        PaginationQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let q = PaginationQuery::default();
        assert_eq!((q.page(), q.page_size()), (1, 10));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let q = query(Some("abc"), Some("1.5"));
        assert_eq!((q.page(), q.page_size()), (1, 10));
    }

    #[test]
    fn test_out_of_range_values_are_normalized() {
        let request = PageRequest::from(query(Some("0"), Some("500")));
        assert_eq!(request, PageRequest { page: 1, page_size: 10 });

        let request = PageRequest::from(query(Some("3"), Some("25")));
        assert_eq!(request, PageRequest { page: 3, page_size: 25 });
    }
}
