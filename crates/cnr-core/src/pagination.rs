//! # Pagination cursor
//!
//! Tracks the current page and page size against an authoritative total
//! (server-side pagination: the backend's `meta.total` drives clamping).
//! The page is always clamped into `[1, ceil(total/size)]` whenever the
//! total or the size changes, and a size change resets to page 1 so the
//! cursor never points at a page that no longer exists.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Allowed page sizes, mirroring the dashboard's rows-per-page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    /// 10 rows per page (default).
    Ten,
    /// 25 rows per page.
    TwentyFive,
    /// 50 rows per page.
    Fifty,
    /// 100 rows per page.
    Hundred,
}

impl PageSize {
    /// Validate a raw size against the allowed set.
    pub fn new(size: u32) -> Result<Self, DomainError> {
        match size {
            10 => Ok(Self::Ten),
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(DomainError::InvalidPageSize(other)),
        }
    }

    /// The numeric row count.
    pub fn as_u32(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Ten
    }
}

/// The pagination cursor: current page, page size, authoritative total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u32,
    size: PageSize,
    total: u64,
}

impl Pagination {
    /// A cursor at page 1 with the default size and no known total yet.
    pub fn new() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
            total: 0,
        }
    }

    /// Current page, always ≥ 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Authoritative record total as last reported by the backend.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages for the current total and size, never below 1 so
    /// an empty collection still has a valid page 1.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.size.as_u32());
        let pages = self.total.div_ceil(size);
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    /// Zero-based offset of the first row on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size.as_u32())
    }

    /// Row limit for a server-side fetch.
    pub fn limit(&self) -> u32 {
        self.size.as_u32()
    }

    /// Record a new authoritative total, clamping the page if it now
    /// points past the end.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.clamp();
    }

    /// Change the page size. Always resets to page 1.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    /// Jump to a page; out-of-range targets are clamped, not rejected.
    pub fn jump(&mut self, page: u32) {
        self.page = page.max(1);
        self.clamp();
    }

    /// Advance one page, saturating at the last page.
    pub fn next(&mut self) {
        self.jump(self.page.saturating_add(1));
    }

    /// Go back one page, saturating at page 1.
    pub fn prev(&mut self) {
        self.jump(self.page.saturating_sub(1).max(1));
    }

    fn clamp(&mut self) {
        let max = self.total_pages();
        if self.page > max {
            self.page = max;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}
