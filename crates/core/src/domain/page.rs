// Pagination

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalised page request.
///
/// Construct through [`PageRequest::normalized`]; out-of-range input never
/// errors, it falls back to the first page or the default size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn normalized(page_number: i64, page_size: i64) -> Self {
        let page_number = if page_number < 1 {
            DEFAULT_PAGE_NUMBER
        } else {
            page_number
        };
        let page_size = if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalized(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}
