//! Page navigation and client-side ordering of fetched results.

use std::cmp::Ordering;

/// Position within a paged result set whose total size is unknown.
///
/// Pages are 1-based. Whether a next page exists is inferred from the last
/// fetch: a full page means there may be more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    per_page: u32,
    has_more: bool,
}

impl PageCursor {
    /// Start at page 1 with `per_page` items per page.
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            has_more: false,
        }
    }

    /// Current page number.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Whether the last fetched page was full.
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a previous page exists.
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Zero-based index of the first item on the current page.
    pub const fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Record how many items the fetch for the current page returned.
    pub fn record_fetch(&mut self, len: usize) {
        self.has_more = len == self.per_page as usize;
    }

    /// Move to the next page, if the last fetch suggests one exists.
    pub fn next_page(&mut self) -> Option<u32> {
        if !self.has_more {
            return None;
        }
        self.page += 1;
        self.has_more = false;
        Some(self.page)
    }

    /// Move to the previous page.
    pub fn prev_page(&mut self) -> Option<u32> {
        if !self.has_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.page)
    }

    /// Back to page 1, as for a new query.
    pub fn reset(&mut self) {
        self.page = 1;
        self.has_more = false;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Number of pages needed for `len` items.
pub const fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Slice page `page` (1-based) out of already-fetched items.
///
/// Out-of-range pages yield an empty slice; page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 {
        return &[];
    }
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Stable in-place sort with an explicit total-order comparator.
///
/// Equal elements keep their fetched order.
pub fn sort_stable<T>(items: &mut [T], compare: impl FnMut(&T, &T) -> Ordering) {
    items.sort_by(compare);
}
