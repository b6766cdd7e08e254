use serde::Serialize;

/// Grid size used when the caller asks for a non-positive page size.
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A clamped, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// `page < 1` becomes 1, `page_size < 1` becomes [`DEFAULT_PAGE_SIZE`],
    /// and sizes above [`MAX_PAGE_SIZE`] are capped.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE as i64) as u32
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based index of the first row on this page.
    pub fn first_row(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }

    /// Zero-based index of the last row on this page (inclusive).
    pub fn last_row(&self) -> usize {
        self.page as usize * self.page_size as usize - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: usize, request: PageRequest) -> Self {
        let total_pages = total_count.div_ceil(request.page_size() as usize) as u32;
        Self {
            items,
            total_count,
            page: request.page(),
            page_size: request.page_size(),
            total_pages,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_nine() {
        let request = PageRequest::new(2, 9);
        assert_eq!(request.first_row(), 9);
        assert_eq!(request.last_row(), 17);
    }

    #[test]
    fn test_bounds_are_clamped() {
        assert_eq!(PageRequest::new(0, 9).page(), 1);
        assert_eq!(PageRequest::new(-3, 9).page(), 1);
        assert_eq!(PageRequest::new(1, 0).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(1, -1).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(1, 5_000).page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![1, 2], 20, PageRequest::new(3, 9));
        assert_eq!(page.total_pages, 3);
        assert_eq!(Page::<u8>::empty(PageRequest::default()).total_pages, 0);
    }
}
