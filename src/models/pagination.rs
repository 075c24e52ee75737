//! Pagination types shared by listing queries

use serde::{Deserialize, Serialize};

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 12,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.per_page as u64
    }

    /// Maximum number of rows on this page
    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: 12,
        }
    }
}
