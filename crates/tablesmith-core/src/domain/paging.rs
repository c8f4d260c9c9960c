//! Page-number pagination.
//!
//! Generated services translate `(pageNum, pageSize)` to `(offset, limit)`
//! with [`offset_for`]; the generated API layer rejects out-of-range input
//! before it reaches the service. [`PageRequest`] is the validated form.

use super::error::DomainError;

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// `(page_number - 1) * page_size`, unchecked. Wraps on overflow the way
/// the generated service's integer arithmetic does.
pub const fn offset_for(page_number: i64, page_size: i64) -> i64 {
    page_number.wrapping_sub(1).wrapping_mul(page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: i64,
    size: i64,
}

impl PageRequest {
    /// Rejects pages before the first, empty pages, and pages whose offset
    /// does not fit in an `i64`.
    pub fn new(number: i64, size: i64) -> Result<Self, DomainError> {
        if number < 1 || size < 1 || (number - 1).checked_mul(size).is_none() {
            return Err(DomainError::InvalidPage { page: number, size });
        }
        Ok(Self { number, size })
    }

    pub const fn number(&self) -> i64 {
        self.number
    }

    pub const fn size(&self) -> i64 {
        self.size
    }

    pub const fn offset(&self) -> i64 {
        offset_for(self.number, self.size)
    }

    pub const fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
