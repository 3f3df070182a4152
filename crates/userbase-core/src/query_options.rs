//! List query options.
//!
//! Translates the raw `p`, `l`, `o` and `f` query parameters of a list
//! request into a [`ListOptions`] directive: offset, limit, sort string and
//! equality filters.
//!
//! # Parameters
//!
//! - `p`: 1-indexed page number. Absent, empty, non-numeric or below 1 means
//!   no page and an offset of 0.
//! - `l`: page size. Defaults to 10, clamped to `[1, 100]`.
//! - `o`: comma-separated sort fields, `-` prefix for descending
//!   (`age,-name` becomes `"age -name"`).
//! - `f`: comma-separated `field:value` equality filters, split on the first
//!   colon.
//!
//! The translator never validates field names; interpreting the sort string
//! and filters against a concrete schema is the store's job.
//!
//! # Example
//!
//! ```ignore
//! // GET /users?p=5&l=10&o=-firstName&f=lastName:Doe
//! let options = ListOptions::from(&query);
//!
//! assert_eq!(options.offset, 40);
//! assert_eq!(options.order.as_deref(), Some("-firstName"));
//! ```

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw list query parameters, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOptionsQuery {
    /// Page number, 1-indexed
    pub p: Option<String>,
    /// Items per page (1-100, default: 10)
    pub l: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending
    pub o: Option<String>,
    /// Comma-separated `field:value` equality filters
    pub f: Option<String>,
}

/// A single equality constraint parsed from the `f` parameter.
///
/// `value` is `None` when the entry had no colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub value: Option<String>,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            field: field.into(),
            value: value.map(str::to_string),
        }
    }
}

/// Normalized list directive consumed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<i64>,
    pub limit: i64,
    pub offset: i64,
    pub order: Option<String>,
    pub filter: Vec<FilterClause>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: None,
            filter: Vec::new(),
        }
    }
}

impl From<&ListOptionsQuery> for ListOptions {
    fn from(query: &ListOptionsQuery) -> Self {
        let page = parse_page(query.p.as_deref());
        let limit = parse_limit(query.l.as_deref());
        let offset = page.map_or(0, |page| (page - 1).saturating_mul(limit));

        Self {
            page,
            limit,
            offset,
            order: parse_order(query.o.as_deref()),
            filter: parse_filter(query.f.as_deref()),
        }
    }
}

impl From<ListOptionsQuery> for ListOptions {
    fn from(query: ListOptionsQuery) -> Self {
        Self::from(&query)
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn parse_page(raw: Option<&str>) -> Option<i64> {
    present(raw)
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
}

fn parse_limit(raw: Option<&str>) -> i64 {
    present(raw)
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

fn parse_order(raw: Option<&str>) -> Option<String> {
    present(raw).map(|order| order.split(',').collect::<Vec<_>>().join(" "))
}

fn parse_filter(raw: Option<&str>) -> Vec<FilterClause> {
    let Some(filter) = present(raw) else {
        return Vec::new();
    };

    filter
        .split(',')
        .map(|item| match item.split_once(':') {
            Some((field, value)) => FilterClause::new(field, Some(value)),
            None => FilterClause::new(item, None),
        })
        .collect()
}
