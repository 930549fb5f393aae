//! Pagination types.

use serde::Serialize;

/// A window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Derives the total row count from the content length alone, when the
    /// window proves it.
    ///
    /// Returns `Some` when the count query can be skipped:
    /// - first page, shorter than the limit: the dataset fits in one page, so
    ///   `total == content_len`;
    /// - a later page that is non-empty and shorter than the limit: it must be
    ///   the last page, so `total == offset + content_len`.
    ///
    /// A full page says nothing about what follows, and an empty later page
    /// says nothing about where the data ended; both return `None` and the
    /// caller must count.
    pub(crate) fn total_without_count(&self, content_len: usize) -> Option<u64> {
        let len = content_len as u64;
        if len >= u64::from(self.limit) {
            return None;
        }
        if self.offset == 0 {
            return Some(len);
        }
        if len > 0 {
            return Some(u64::from(self.offset) + len);
        }
        None
    }
}

/// One page of results plus pagination metadata.
///
/// Invariants: `content.len() <= limit` and `offset + content.len() <= total`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub offset: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: PageRequest, total: u64) -> Self {
        Self {
            content,
            offset: page.offset,
            limit: page.limit,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether rows exist past this window.
    pub fn has_next(&self) -> bool {
        u64::from(self.offset) + (self.content.len() as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_shorter_than_limit_is_the_whole_set() {
        assert_eq!(PageRequest::new(0, 10).total_without_count(3), Some(3));
        assert_eq!(PageRequest::new(0, 10).total_without_count(0), Some(0));
        assert_eq!(PageRequest::new(0, 10).total_without_count(9), Some(9));
    }

    #[test]
    fn full_page_requires_a_count() {
        assert_eq!(PageRequest::new(0, 10).total_without_count(10), None);
        assert_eq!(PageRequest::new(20, 10).total_without_count(10), None);
    }

    #[test]
    fn short_later_page_is_the_last_page() {
        assert_eq!(PageRequest::new(20, 10).total_without_count(4), Some(24));
        assert_eq!(PageRequest::new(20, 10).total_without_count(9), Some(29));
    }

    #[test]
    fn empty_later_page_requires_a_count() {
        // The offset may point anywhere past the end.
        assert_eq!(PageRequest::new(20, 10).total_without_count(0), None);
    }

    #[test]
    fn zero_limit_requires_a_count() {
        assert_eq!(PageRequest::new(0, 0).total_without_count(0), None);
    }
}
