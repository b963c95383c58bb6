use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Hard cap on page size so a single request cannot drag the whole table.
pub const MAX_LIMIT: u64 = 100;

fn default_limit() -> u64 {
    20
}

fn clamped_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let limit = u64::deserialize(deserializer)?;
    Ok(limit.min(MAX_LIMIT))
}

/// Limit/offset query parameters shared by all list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Maximum number of items to return (default 20, capped at 100).
    #[serde(default = "default_limit", deserialize_with = "clamped_limit")]
    pub limit: u64,
    /// Number of items to skip (default 0).
    #[serde(default)]
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
