//! Pagination types

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 6;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page of 0 falls back to 1
    /// - Limit of 0 falls back to the default; any positive limit is kept
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build from raw query-string values, falling back to defaults for
    /// anything that is not a positive integer.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(parse_positive).unwrap_or(1),
            limit.and_then(parse_positive).unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl<T> Paginated<T> {
    /// Total number of pages; zero when there are no items at all.
    pub fn total_pages(&self) -> i64 {
        if self.total <= 0 {
            0
        } else {
            (self.total + i64::from(self.limit) - 1) / i64::from(self.limit)
        }
    }

    /// Next page number, or `None` on the last page.
    pub fn next_page(&self) -> Option<u32> {
        (i64::from(self.page) < self.total_pages()).then(|| self.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, limit: u32) -> Paginated<()> {
        Paginated {
            items: vec![],
            total,
            page,
            limit,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 6).offset(), 0);
        assert_eq!(Pagination::new(2, 6).offset(), 6);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn clamps_values() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(1, 0).limit, DEFAULT_LIMIT);
        assert_eq!(Pagination::new(1, 999).limit, 999);
        assert_eq!(Pagination::from_raw(None, Some("250")).limit, 250);
    }

    #[test]
    fn raw_values_fall_back_to_defaults() {
        assert_eq!(Pagination::from_raw(None, None), Pagination::default());
        assert_eq!(
            Pagination::from_raw(Some("abc"), Some("-3")),
            Pagination::default()
        );
        assert_eq!(
            Pagination::from_raw(Some("0"), Some("0")),
            Pagination::default()
        );
        assert_eq!(
            Pagination::from_raw(Some("4"), Some("10")),
            Pagination::new(4, 10)
        );
    }

    #[test]
    fn total_pages() {
        assert_eq!(page_of(0, 1, 6).total_pages(), 0);
        assert_eq!(page_of(6, 1, 6).total_pages(), 1);
        assert_eq!(page_of(7, 1, 6).total_pages(), 2);
        assert_eq!(page_of(100, 1, 10).total_pages(), 10);
    }

    #[test]
    fn next_page() {
        assert_eq!(page_of(0, 1, 6).next_page(), None);
        assert_eq!(page_of(13, 1, 6).next_page(), Some(2));
        assert_eq!(page_of(13, 2, 6).next_page(), Some(3));
        assert_eq!(page_of(13, 3, 6).next_page(), None);
        // past the end
        assert_eq!(page_of(13, 9, 6).next_page(), None);
    }
}
