//! Limit/page parsing and page metadata shared by list operations

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;
pub const MAX_LIMIT: u64 = 100;

/// Largest offset a SQL `BIGINT` can carry
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Requested window of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl PageRequest {
    /// Parse raw query values; anything that is not a positive signed 64-bit
    /// integer falls back to the default. `limit` is capped at [`MAX_LIMIT`].
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Self {
        Self {
            limit: positive(limit).map_or(DEFAULT_LIMIT, |limit| limit.min(MAX_LIMIT)),
            page: positive(page).unwrap_or(DEFAULT_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_OFFSET)
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value.unsigned_abs())
}

/// Pagination metadata returned next to a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub limit: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.limit);
        Self {
            current_page: request.page,
            total_pages,
            total_items,
            limit: request.limit,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            info: PageInfo::new(request, total_items),
        }
    }
}
