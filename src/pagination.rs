use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

/// The only page sizes the API will serve. Anything else silently falls back
/// to [`DEFAULT_LIMIT`] — requests are never rejected over a bad limit.
pub const ALLOWED_LIMITS: [i64; 3] = [5, 10, 30];
pub const DEFAULT_LIMIT: i64 = 5;

/// PageQuery
///
/// The query parameters accepted by every paginated listing endpoint.
/// Both are optional; the accessors apply the clamping rules.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-indexed page number. Out-of-range pages yield an empty data array,
    /// not an error.
    pub page: Option<i64>,
    /// Requested page size; coerced to one of {5, 10, 30}.
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Coerces a requested limit into the allowed set, falling back to the
/// default for anything unknown (including absent and non-positive values).
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    match requested {
        Some(l) if ALLOWED_LIMITS.contains(&l) => l,
        _ => DEFAULT_LIMIT,
    }
}

/// `ceil(total / limit)`; 0 when the collection is empty.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Page
///
/// The envelope every listing endpoint returns: the page of rows plus enough
/// arithmetic for a client to render pagination controls.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Assembles the envelope from one page of rows and the overall count,
    /// echoing back the effective (clamped) page and limit.
    pub fn new(data: Vec<T>, total: i64, query: &PageQuery) -> Self {
        let limit = query.limit();
        Page {
            total,
            total_pages: total_pages(total, limit),
            page: query.page(),
            limit,
            data,
        }
    }
}
