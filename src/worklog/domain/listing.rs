//! Listing and search parameters plus the paged result shape.
//!
//! A single [`ListQuery`] covers both plain sorted listing and ranked
//! search; every parameter is optional and defaulted. Page indices are
//! zero-based, so the row offset is `page * page_size`.

use super::{WorkLog, WorkLogDomainError};
use serde::Serialize;

/// Column a plain listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Order by task name.
    TaskName,
    /// Order by task type.
    TaskType,
    /// Order by task status.
    TaskStatus,
    /// Order by priority.
    Priority,
    /// Order by start timestamp.
    StartedAt,
    /// Order by completion timestamp.
    CompletedAt,
    /// Order by creation timestamp.
    CreatedAt,
    /// Order by last update timestamp.
    #[default]
    UpdatedAt,
}

impl SortField {
    const ALL: [Self; 8] = [
        Self::TaskName,
        Self::TaskType,
        Self::TaskStatus,
        Self::Priority,
        Self::StartedAt,
        Self::CompletedAt,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Returns the storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::TaskName => "task_name",
            Self::TaskType => "task_type",
            Self::TaskStatus => "task_status",
            Self::Priority => "priority",
            Self::StartedAt => "started_at",
            Self::CompletedAt => "completed_at",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Returns the camelCase name used on the wire.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::TaskName => "taskName",
            Self::TaskType => "taskType",
            Self::TaskStatus => "taskStatus",
            Self::Priority => "priority",
            Self::StartedAt => "startedAt",
            Self::CompletedAt => "completedAt",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = WorkLogDomainError;

    /// Accepts either the wire name (`updatedAt`) or the column name
    /// (`updated_at`).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.api_name() == trimmed || field.column() == trimmed)
            .ok_or_else(|| WorkLogDomainError::InvalidSortField(value.to_owned()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = WorkLogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(WorkLogDomainError::InvalidSortOrder(value.to_owned())),
        }
    }
}

/// Number of rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Page size used when the caller does not supply one.
    pub const DEFAULT: Self = Self(10);

    /// Largest page size accepted.
    pub const MAX: u32 = 100;

    /// Creates a validated page size.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidPageSize`] unless the value is
    /// between 1 and [`Self::MAX`].
    pub fn new(value: i64) -> Result<Self, WorkLogDomainError> {
        u32::try_from(value)
            .ok()
            .filter(|size| (1..=Self::MAX).contains(size))
            .map(Self)
            .ok_or_else(|| WorkLogDomainError::InvalidPageSize(value.to_string()))
    }

    /// Returns the page size.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Zero-based page index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PageIndex(u32);

impl PageIndex {
    /// Creates a validated page index.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidPage`] when the value is
    /// negative or too large.
    pub fn new(value: i64) -> Result<Self, WorkLogDomainError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| WorkLogDomainError::InvalidPage(value.to_string()))
    }

    /// Returns the page index.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Normalised free-text search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText {
    raw: String,
    tokens: Vec<String>,
}

impl SearchText {
    /// Parses search text, returning `None` when it is blank.
    ///
    /// Tokens are split on whitespace and reduced to alphanumeric and
    /// underscore characters so they can never form tsquery operators.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let raw = value.trim();
        if raw.is_empty() {
            return None;
        }
        let tokens = raw
            .split_whitespace()
            .map(|token| {
                token
                    .chars()
                    .filter(|ch| ch.is_alphanumeric() || *ch == '_')
                    .collect::<String>()
            })
            .filter(|token| !token.is_empty())
            .collect();
        Some(Self {
            raw: raw.to_owned(),
            tokens,
        })
    }

    /// Returns the trimmed text used for similarity scoring.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the sanitised search tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the tokens joined with the tsquery AND operator.
    #[must_use]
    pub fn ts_query(&self) -> String {
        self.tokens.join(" & ")
    }
}

/// Listing request: optional search plus sort and pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<SearchText>,
    sort_field: SortField,
    sort_order: SortOrder,
    page_size: PageSize,
    page: PageIndex,
}

impl ListQuery {
    /// Creates a query with every parameter defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text; blank text clears the search.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = SearchText::parse(text);
        self
    }

    /// Sets the sort column.
    #[must_use]
    pub const fn with_sort_field(mut self, sort_field: SortField) -> Self {
        self.sort_field = sort_field;
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the zero-based page index.
    #[must_use]
    pub const fn with_page(mut self, page: PageIndex) -> Self {
        self.page = page;
        self
    }

    /// Returns the search text, if any.
    #[must_use]
    pub const fn search(&self) -> Option<&SearchText> {
        self.search.as_ref()
    }

    /// Returns the sort column.
    #[must_use]
    pub const fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(&self) -> PageIndex {
        self.page
    }

    /// Returns the number of rows to skip: `page * page_size`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.value()) * u64::from(self.page_size.value())
    }

    /// Returns the maximum number of rows in one page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size.value())
    }
}

/// One page of listing results with pager metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    logs: Vec<WorkLog>,
    total_count: u64,
    total_pages: u64,
}

impl LogPage {
    /// Builds a page, deriving `total_pages = ceil(total_count / page_size)`.
    #[must_use]
    pub fn new(logs: Vec<WorkLog>, total_count: u64, page_size: PageSize) -> Self {
        Self {
            logs,
            total_count,
            total_pages: total_count.div_ceil(u64::from(page_size.value())),
        }
    }

    /// Returns the rows on this page.
    #[must_use]
    pub fn logs(&self) -> &[WorkLog] {
        &self.logs
    }

    /// Returns the number of rows matching the query across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }
}
