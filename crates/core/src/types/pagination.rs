//! Page arithmetic for offset-paginated backend lists.

use serde::{Deserialize, Serialize};

/// Rows per page when the caller does not ask for a size.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Largest page size the dashboard will request.
pub const MAX_PER_PAGE: u32 = 100;

/// Bound a caller-supplied page size to `1..=MAX_PER_PAGE`.
///
/// `None` and `0` fall back to [`DEFAULT_PER_PAGE`].
#[must_use]
pub fn clamp_per_page(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_PER_PAGE,
        Some(n) => n.min(MAX_PER_PAGE),
    }
}

/// Position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-indexed.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Total rows across all pages.
    pub total: u64,
    /// Page count reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
}

impl Pagination {
    /// Create a pagination state from a request's page/size and the server's total.
    #[must_use]
    pub const fn new(page: u32, per_page: u32, total: u64) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            per_page,
            total,
            last_page: None,
        }
    }

    /// Prefer the server's own page count over the computed one.
    #[must_use]
    pub const fn with_last_page(mut self, last_page: Option<u32>) -> Self {
        self.last_page = last_page;
        self
    }

    /// `ceil(total / per_page)`, or the server-reported value when present.
    ///
    /// A zero page size yields zero pages.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        if let Some(last) = self.last_page {
            return last;
        }
        if self.per_page == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Previous page number, if any.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u32> {
        if self.has_previous() {
            Some(self.page - 1)
        } else {
            None
        }
    }

    /// Next page number, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// Page numbers within `radius` of the current page, clamped to the valid range.
    #[must_use]
    pub fn window(&self, radius: u32) -> Vec<u32> {
        let count = self.page_count();
        if count == 0 {
            return Vec::new();
        }
        let current = self.page.min(count);
        let start = current.saturating_sub(radius).max(1);
        let end = current.saturating_add(radius).min(count);
        (start..=end).collect()
    }

    /// Whether this page lies beyond the last row of a non-empty collection.
    #[must_use]
    pub fn is_past_end(&self) -> bool {
        self.total > 0 && self.offset() >= self.total
    }

    fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// 1-indexed position of the first row on this page (0 when it has none).
    #[must_use]
    pub fn first_row(&self) -> u64 {
        if self.total == 0 || self.is_past_end() {
            return 0;
        }
        self.offset() + 1
    }

    /// 1-indexed position of the last row on this page (0 when it has none).
    #[must_use]
    pub fn last_row(&self) -> u64 {
        if self.is_past_end() {
            return 0;
        }
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }
}
