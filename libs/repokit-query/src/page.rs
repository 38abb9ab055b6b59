//! Page results: a window of items plus the total match count.

use serde::{Deserialize, Serialize};

use crate::pagination::PageParams;

/// One page of results. `items` holds at most `size` entries; `total`
/// counts every row matching the filters, independent of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page(),
            size: params.size(),
        }
    }

    /// Convert the item type while keeping the window metadata,
    /// typically model -> domain/DTO.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
