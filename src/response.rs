//! Response envelopes: pagination types and list-shape normalization.
//!
//! The backend answers list calls in several envelopes. [`LIST_SHAPES`] holds the
//! recognized ones in priority order; anything else falls through to an empty page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_records: u64,
}

impl Pagination {
    /// Single synthetic page holding `len` records.
    pub fn single_page(len: usize) -> Self {
        Pagination {
            current_page: 1,
            page_size: len as u64,
            total_pages: 1,
            total_records: len as u64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn empty() -> Self {
        PaginatedResponse {
            data: Vec::new(),
            pagination: Pagination::single_page(0),
        }
    }
}

/// Raw list page before items are mapped into entities.
#[derive(Debug, PartialEq)]
pub struct RawPage {
    pub items: Vec<Value>,
    pub pagination: Pagination,
}

/// Result of one shape matcher.
enum Extracted {
    /// Unwrapped an envelope; run the matchers again on the inner value.
    Unwrap(Value),
    Page(RawPage),
}

/// A recognized list envelope: a pure predicate plus an extractor.
struct ListShape {
    name: &'static str,
    matches: fn(&Value) -> bool,
    extract: fn(Value) -> Extracted,
}

const LIST_SHAPES: &[ListShape] = &[
    ListShape {
        name: "success_wrapper",
        matches: is_success_wrapper,
        extract: extract_success_wrapper,
    },
    ListShape {
        name: "paginated",
        matches: is_paginated,
        extract: extract_paginated,
    },
    ListShape {
        name: "bare_array",
        matches: Value::is_array,
        extract: extract_bare_array,
    },
    ListShape {
        name: "data_array",
        matches: is_data_array,
        extract: extract_data_array,
    },
];

fn is_success_wrapper(v: &Value) -> bool {
    v.as_object()
        .map(|o| o.contains_key("success") && o.contains_key("data"))
        .unwrap_or(false)
}

fn extract_success_wrapper(v: Value) -> Extracted {
    match v {
        Value::Object(mut o) => Extracted::Unwrap(o.remove("data").unwrap_or(Value::Null)),
        other => Extracted::Unwrap(other),
    }
}

/// Unsigned count from a number or a numeric string.
fn count(v: Option<&Value>) -> Option<u64> {
    match v? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Pagination as reported by the backend, field by field. Missing or unreadable
/// fields fall back to a single page of `len` items; `total_pages` is derived from
/// the reported totals when absent.
fn provided_pagination(v: Option<&Value>, len: usize) -> Option<Pagination> {
    let p = v.filter(|p| p.is_object())?;
    let fallback = Pagination::single_page(len);
    let current_page = count(p.get("current_page")).unwrap_or(fallback.current_page);
    let page_size = count(p.get("page_size")).unwrap_or(fallback.page_size);
    let total_records = count(p.get("total_records")).unwrap_or(fallback.total_records);
    let total_pages = count(p.get("total_pages")).unwrap_or_else(|| {
        if page_size == 0 {
            fallback.total_pages
        } else {
            total_records.div_ceil(page_size).max(1)
        }
    });
    Some(Pagination {
        current_page,
        page_size,
        total_pages,
        total_records,
    })
}

fn is_paginated(v: &Value) -> bool {
    v.get("data").map(Value::is_array).unwrap_or(false) && v.get("pagination").map(Value::is_object).unwrap_or(false)
}

fn extract_paginated(v: Value) -> Extracted {
    extract_data_array(v)
}

fn extract_bare_array(v: Value) -> Extracted {
    let items = match v {
        Value::Array(a) => a,
        _ => Vec::new(),
    };
    let pagination = Pagination::single_page(items.len());
    Extracted::Page(RawPage { items, pagination })
}

fn is_data_array(v: &Value) -> bool {
    v.get("data").map(Value::is_array).unwrap_or(false)
}

fn extract_data_array(v: Value) -> Extracted {
    let reported = v.get("pagination").cloned();
    let items = take_data_array(v);
    let pagination = provided_pagination(reported.as_ref(), items.len())
        .unwrap_or_else(|| Pagination::single_page(items.len()));
    Extracted::Page(RawPage { items, pagination })
}

fn take_data_array(v: Value) -> Vec<Value> {
    match v {
        Value::Object(mut o) => match o.remove("data") {
            Some(Value::Array(a)) => a,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Normalize a list response into a raw page. Unrecognized shapes (including an
/// empty body) are logged and yield an empty page; this never fails.
pub fn normalize_list(response: Option<Value>, entity: &str) -> RawPage {
    let mut current = match response {
        Some(v) => v,
        None => {
            tracing::warn!(entity = %entity, "empty list response");
            return empty_page();
        }
    };
    'shapes: loop {
        for shape in LIST_SHAPES {
            if (shape.matches)(&current) {
                tracing::trace!(entity = %entity, shape = shape.name, "list shape");
                match (shape.extract)(current) {
                    Extracted::Unwrap(inner) => {
                        current = inner;
                        continue 'shapes;
                    }
                    Extracted::Page(page) => return page,
                }
            }
        }
        tracing::warn!(entity = %entity, response = %current, "unexpected list response shape");
        return empty_page();
    }
}

fn empty_page() -> RawPage {
    RawPage {
        items: Vec::new(),
        pagination: Pagination::single_page(0),
    }
}

/// Unwrap one `{ "data": ... }` level if present; anything else passes through.
pub fn unwrap_data(v: Value) -> Value {
    match v {
        Value::Object(mut o) if o.contains_key("data") => o.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}
