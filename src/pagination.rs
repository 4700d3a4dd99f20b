//! Fixed-size pagination shared by every question listing.

/// Questions returned per page.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-based page number. Anything below 1 is clamped to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Self {
        Self { page: page.max(1) }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// One page of a larger result set.
///
/// `total` is the size of the whole filtered set, not of `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(QUESTIONS_PER_PAGE) < self.total
    }

    // Deliberately independent of `total`: a page past the end still links back.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Link to the following page of `path`, if there is one.
    pub fn next_url(&self, path: &str) -> Option<String> {
        self.has_next()
            .then(|| format!("{path}?page={}", self.page + 1))
    }

    /// Link to the preceding page of `path`, if there is one.
    pub fn prev_url(&self, path: &str) -> Option<String> {
        self.has_prev()
            .then(|| format!("{path}?page={}", self.page - 1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total: self.total,
        }
    }
}
