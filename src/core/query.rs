//! Query requests, request normalization and pagination utilities

use crate::core::filter::{FilterSet, parse_age_bound, parse_leading_int};
use crate::core::sort::SortSpec;
use serde::{Deserialize, Serialize};

/// Page size used when the request does not carry a usable one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One logical query against the transaction collection
///
/// This is the strongly-typed request every store receives. Loosely typed
/// transport parameters are turned into it by [`QueryParams::into_query`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesQuery {
    /// Free-text search over customer name and phone number
    pub search: Option<String>,
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub page: PageSpec,
}

/// Requested page window
///
/// `number` is 1-based. Neither field is validated against the result size;
/// degenerate values (`number < 1`, `size < 1`) produce an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub number: i64,
    pub size: i64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageSpec {
    pub fn new(number: i64, size: i64) -> Self {
        Self { number, size }
    }

    /// `(offset, limit)` of the window, or `None` for a degenerate request
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.number < 1 || self.size < 1 {
            return None;
        }
        let size = self.size as u64;
        let offset = (self.number as u64 - 1).saturating_mul(size);
        Some((offset, size))
    }
}

/// Raw query parameters as they arrive from the transport
///
/// Every list dimension may arrive as a single value or repeated
/// (`regions=North&regions=South`, or `regions[]=North`). Empty values are
/// dropped. All numeric parameters are kept as text until
/// [`into_query`](Self::into_query) so malformed input can be ignored
/// instead of rejecting the request.
///
/// # Example
/// ```rust,ignore
/// let params = QueryParams::from_pairs(vec![
///     ("regions[]".to_string(), "North".to_string()),
///     ("sortBy".to_string(), "quantity".to_string()),
/// ]);
/// let query = params.into_query();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub order_status: Vec<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl QueryParams {
    /// Collect parameters from decoded `key=value` pairs
    ///
    /// Unknown keys are ignored. For scalar parameters the last occurrence wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = key.strip_suffix("[]").unwrap_or(&key);
            if value.is_empty() {
                continue;
            }

            match key {
                "search" => params.search = Some(value),
                "page" => params.page = Some(value),
                "pageSize" => params.page_size = Some(value),
                "sortBy" => params.sort_by = Some(value),
                "sortOrder" => params.sort_order = Some(value),
                "regions" => params.regions.push(value),
                "genders" => params.genders.push(value),
                "categories" => params.categories.push(value),
                "tags" => params.tags.push(value.trim().to_string()),
                "paymentMethods" => params.payment_methods.push(value),
                "orderStatus" => params.order_status.push(value),
                "minAge" => params.min_age = Some(value),
                "maxAge" => params.max_age = Some(value),
                "startDate" => params.start_date = Some(value),
                "endDate" => params.end_date = Some(value),
                _ => {}
            }
        }

        params.tags.retain(|t| !t.is_empty());
        params
    }

    /// Normalize into a [`SalesQuery`] with the default page size
    pub fn into_query(self) -> SalesQuery {
        self.into_query_with(DEFAULT_PAGE_SIZE)
    }

    /// Normalize into a [`SalesQuery`]
    ///
    /// - missing or non-numeric `page` → 1, `pageSize` → `default_page_size`
    /// - missing sort → `date` / `desc`; unknown sort keys → no reordering
    /// - malformed or negative age bounds → dimension ignored
    pub fn into_query_with(self, default_page_size: i64) -> SalesQuery {
        let page = self
            .page
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(1);
        let page_size = self
            .page_size
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(default_page_size);

        let sort = SortSpec::parse(
            self.sort_by.as_deref().unwrap_or("date"),
            self.sort_order.as_deref().unwrap_or("desc"),
        );

        let filters = FilterSet {
            regions: self.regions,
            genders: self.genders,
            categories: self.categories,
            tags: self.tags,
            payment_methods: self.payment_methods,
            order_status: self.order_status,
            min_age: self.min_age.as_deref().and_then(parse_age_bound),
            max_age: self.max_age.as_deref().and_then(parse_age_bound),
            start_date: self.start_date,
            end_date: self.end_date,
        };

        SalesQuery {
            search: self.search,
            filters,
            sort,
            page: PageSpec::new(page, page_size),
        }
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Requested page number (1-based, echoed as given)
    pub current_page: i64,

    /// Requested page size (echoed as given)
    pub page_size: i64,

    /// Total number of items after search and filters
    pub total_items: u64,

    /// `ceil(total_items / page_size)`, 0 for a non-positive page size
    pub total_pages: u64,

    /// Whether the window ends before the last item
    pub has_next_page: bool,

    /// Whether the page number is above 1
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: PageSpec, total_items: u64) -> Self {
        let total_pages = if page.size < 1 {
            0
        } else {
            total_items.div_ceil(page.size as u64)
        };
        // end index of the window; i128 keeps extreme inputs from overflowing
        let end = i128::from(page.number) * i128::from(page.size);

        Self {
            current_page: page.number,
            page_size: page.size,
            total_items,
            total_pages,
            has_next_page: end < i128::from(total_items),
            has_previous_page: page.number > 1,
        }
    }
}

/// Pagination stage: cut one window out of an ordered sequence
pub fn paginate<T: Clone>(items: &[T], page: PageSpec) -> PaginatedResponse<T> {
    let data = match page.window() {
        Some((offset, limit)) => items
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    PaginatedResponse {
        data,
        pagination: PaginationMeta::new(page, items.len() as u64),
    }
}
