//! Query-level value objects shared by repokit repositories.
//!
//! This crate is ORM-agnostic: it defines pagination parameters, page
//! results, ordering primitives and scalar filter maps, plus the error
//! taxonomy surfaced to callers. Translating these into SQL belongs to
//! `repokit-db`.

pub mod errors;
pub mod page;
pub mod pagination;
pub mod value;

pub use errors::Error;
pub use page::Page;
pub use pagination::PageParams;
pub use value::{Scalar, ValueMap};

// Ordering primitives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SortDir {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl SortDir {
    /// Reverse the sort direction (Asc <-> Desc)
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// A single ordering key. The default matches the repository defaults:
/// ascending by `id`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub dir: SortDir,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Desc,
        }
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::asc("id")
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self.dir {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        };
        write!(f, "{} {dir}", self.field)
    }
}
