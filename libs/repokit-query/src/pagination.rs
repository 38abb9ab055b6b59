//! Offset/limit pagination parameters.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Default page number when none is supplied.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when none is supplied.
pub const DEFAULT_SIZE: u64 = 20;

/// Validated pagination window: `page >= 1`, `size >= 1`.
///
/// The constructor is the only way to build one, so an invalid instance
/// cannot reach a repository. Deserialization (e.g. from query-string
/// shaped input) routes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageParams")]
pub struct PageParams {
    page: u64,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct RawPageParams {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_size() -> u64 {
    DEFAULT_SIZE
}

impl TryFrom<RawPageParams> for PageParams {
    type Error = Error;

    fn try_from(raw: RawPageParams) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.size)
    }
}

impl PageParams {
    /// Build validated pagination parameters.
    ///
    /// # Errors
    /// Returns `Error::InvalidPageParams` if `page` or `size` is zero.
    pub fn new(page: u64, size: u64) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::InvalidPageParams(format!(
                "page must be >= 1, received {page}"
            )));
        }
        if size < 1 {
            return Err(Error::InvalidPageParams(format!(
                "size must be >= 1, received {size}"
            )));
        }
        Ok(Self { page, size })
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Row-skip count used verbatim as the query offset:
    /// `(page - 1) * size`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}
