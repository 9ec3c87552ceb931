//! Query types: filters, sorters, pagination and the list response

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a [`Filter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Exact match after string coercion
    Eq,
    /// Case-insensitive substring match
    Contains,
    /// Any operator this engine does not know; the filter is a no-op
    #[serde(other)]
    Unsupported,
}

/// A single `(field, operator, value)` predicate
///
/// Filters in a list compose as a logical AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Shorthand for an `eq` filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Shorthand for a `contains` filter
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc`; anything else is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// One key of a composite ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorter {
    pub field: String,
    pub order: SortOrder,
}

impl Sorter {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Offset pagination request, built fresh for every query
///
/// Both values are at least 1, however the request was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPagination")]
pub struct Pagination {
    current: usize,
    page_size: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPagination {
    current: usize,
    page_size: usize,
}

impl From<RawPagination> for Pagination {
    fn from(raw: RawPagination) -> Self {
        Pagination::new(raw.current, raw.page_size)
    }
}

impl Pagination {
    /// Create a page request, clamping both values to at least 1
    pub fn new(current: usize, page_size: usize) -> Self {
        Self {
            current: current.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Page number (starts at 1)
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of records per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first record on this page
    pub fn start(&self) -> usize {
        (self.current - 1).saturating_mul(self.page_size)
    }

    /// Index one past the last record on this page
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.page_size)
    }
}

/// A page of records plus the number of records that survived filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }

    /// Number of pages needed to show `total` records at `page_size` per page
    pub fn page_count(&self, page_size: usize) -> usize {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(page_size.max(1))
        }
    }

    /// Convert every record in the page, keeping the total
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Query parameters for list endpoints
///
/// Extracted from URL query strings by the REST surface. Everything is
/// optional and malformed pieces are treated as absent.
///
/// # Example
/// ```text
/// GET /subjects?current=2&pageSize=10
/// GET /subjects?filters=[{"field":"department","operator":"eq","value":"math"}]
/// GET /subjects?sort=name:asc,code:desc
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub current: Option<usize>,

    /// Number of records per page; absent means unpaginated
    pub page_size: Option<usize>,

    /// Filters as a JSON array of `{field, operator, value}` objects
    pub filters: Option<String>,

    /// Sorters as a JSON array of `{field, order}` objects
    pub sorters: Option<String>,

    /// Sorter shorthand: `field:asc,other:desc` (a bare `field` is ascending)
    pub sort: Option<String>,
}

impl QueryParams {
    /// Page request, if the caller asked for one
    pub fn pagination(&self) -> Option<Pagination> {
        match (self.current, self.page_size) {
            (None, None) => None,
            (current, Some(size)) => Some(Pagination::new(current.unwrap_or(1), size)),
            (Some(_), None) => None,
        }
    }

    /// Raw filter entries, or nothing if the JSON does not parse as an array
    pub fn filter_values(&self) -> Vec<Value> {
        parse_json_array(self.filters.as_deref())
    }

    /// Raw sorter entries from `sorters` followed by the `sort` shorthand
    pub fn sorter_values(&self) -> Vec<Value> {
        let mut values = parse_json_array(self.sorters.as_deref());

        if let Some(sort) = &self.sort {
            for part in sort.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (field, order) = part.split_once(':').unwrap_or((part, "asc"));
                values.push(serde_json::json!({ "field": field, "order": order }));
            }
        }

        values
    }
}

fn parse_json_array(raw: Option<&str>) -> Vec<Value> {
    raw.and_then(|s| serde_json::from_str::<Value>(s).ok())
        .and_then(|v| match v {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}
