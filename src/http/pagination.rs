/// In-memory pagination for list endpoints
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

impl<T> Page<T> {
    /// Slice `[(page-1)*size, (page-1)*size + size)` out of the full list.
    /// Negative offsets clamp to the start; a non-positive size gives an empty page.
    pub fn from_all(all: Vec<T>, query: PageQuery) -> Self {
        let total = all.len();
        let skip = query
            .page
            .saturating_sub(1)
            .saturating_mul(query.page_size)
            .max(0);
        let take = query.page_size.max(0);

        let data = all
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(take).unwrap_or(usize::MAX))
            .collect();

        Self {
            data,
            total,
            page: query.page,
            page_size: query.page_size,
        }
    }
}
