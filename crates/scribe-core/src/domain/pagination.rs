//! Pagination arithmetic for windowed, sorted listings.

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Field a post listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortField {
    Title,
    ShortDescription,
    Content,
    BlogId,
    BlogName,
    #[default]
    CreatedAt,
}

impl PostSortField {
    /// Parse a wire-level sort field name. Missing or unknown names fall
    /// back to `createdAt`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => Self::Title,
            Some("shortDescription") => Self::ShortDescription,
            Some("content") => Self::Content,
            Some("blogId") => Self::BlogId,
            Some("blogName") => Self::BlogName,
            _ => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Only the literal `"desc"` selects descending order; anything else,
    /// malformed values included, is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Descending,
            _ => Self::Ascending,
        }
    }
}

/// Normalized paging parameters.
///
/// Raw query values arrive as optional strings. Missing, non-numeric, zero
/// or negative page numbers and sizes fall back to the defaults (page 1,
/// size 10) rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
    pub sort_by: PostSortField,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: PostSortField::default(),
            direction: SortDirection::default(),
        }
    }
}

impl PageRequest {
    /// Build a normalized request from raw query strings.
    pub fn from_raw(
        page: Option<&str>,
        page_size: Option<&str>,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            sort_by: PostSortField::parse(sort_by),
            direction: SortDirection::parse(direction),
        }
    }

    /// Zero-based offset of the requested window.
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    /// The window a repository should fetch for this request.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: self.skip(),
            limit: self.page_size,
            sort_by: self.sort_by,
            direction: self.direction,
        }
    }

    /// Number of pages needed to hold `total` items.
    pub fn pages_count(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

/// One sorted window of a collection, as consumed by repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
    pub sort_by: PostSortField,
    pub direction: SortDirection,
}

/// One page of items plus count metadata over the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub pages_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            pages_count: self.pages_count,
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
