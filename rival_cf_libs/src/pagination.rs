use crate::catalog::RatingFilter;
use serde::Serialize;
use thiserror::Error;

type Result<T> = std::result::Result<T, PaginationError>;

pub const ITEMS_PER_PAGE: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// `total_pages` is 0 when the page size itself is 0.
    #[error("page {page} is out of range 1..={total_pages}")]
    OutOfRange { page: usize, total_pages: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    /// Zero-based, inclusive.
    pub start_index: usize,
    /// Zero-based, exclusive.
    pub end_index: usize,
    pub total_items: usize,
}

/// Number of pages needed for `len` items. An empty sequence still has one (empty) page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Slice out page `current_page` (1-based). Out-of-range pages are rejected, never clamped.
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Result<Page<'_, T>> {
    if page_size == 0 {
        return Err(PaginationError::OutOfRange {
            page: current_page,
            total_pages: 0,
        });
    }

    let total_pages = total_pages(items.len(), page_size);
    if current_page < 1 || current_page > total_pages {
        return Err(PaginationError::OutOfRange {
            page: current_page,
            total_pages,
        });
    }

    let start_index = (current_page - 1) * page_size;
    let end_index = (start_index + page_size).min(items.len());

    Ok(Page {
        items: &items[start_index..end_index],
        current_page,
        total_pages,
        start_index,
        end_index,
        total_items: items.len(),
    })
}

/// Current page of a filtered listing.
///
/// Navigation is clamped here so that `paginate` only ever sees valid pages. Changing the
/// filter goes back to the first page; new content under the same filter keeps the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    filter: RatingFilter,
}

impl PageState {
    pub fn new(filter: RatingFilter) -> Self {
        Self {
            current_page: 1,
            page_size: ITEMS_PER_PAGE,
            filter,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter(&self) -> RatingFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: RatingFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.current_page = 1;
        }
    }

    pub fn next(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages.max(1));
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> Result<Page<'a, T>> {
        paginate(items, self.page_size, self.current_page)
    }
}
