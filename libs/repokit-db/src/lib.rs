//! `SeaORM` binding for repokit.
//!
//! This crate turns the value objects from `repokit-query` into real
//! queries: a static per-entity schema descriptor, filter sanitization
//! and compilation to `sea_orm::Condition`, and a generic repository
//! offering find/count/create/update/delete over any entity.
//!
//! # Features
//! - `pg`, `mysql`, `sqlite`: enable the corresponding `SeaORM` sqlx backend
//!
//! # Example
//! ```rust,ignore
//! let schema = EntitySchema::<users::Entity>::new()
//!     .field("id", users::Column::Id, FieldKind::I64)
//!     .field("name", users::Column::Name, FieldKind::String);
//! let repo = SeaOrmRepository::new(db, schema);
//! let page = repo
//!     .find_paginated(&filters, &PageParams::default(), &OrderBy::default())
//!     .await?;
//! ```

pub mod config;
pub mod connect;
pub mod filter;
pub mod repo;
pub mod schema;

mod sea_repo;

pub use config::{DbConfig, PoolCfg};
pub use connect::{connect, is_ready};
pub use filter::{FilterBuildError, sanitize, to_condition};
pub use repo::{EntityRepository, RepoError};
pub use schema::{EntitySchema, Field, FieldKind};
pub use sea_repo::SeaOrmRepository;

pub use sea_orm::ConnectionTrait as DbConnTrait;

use thiserror::Error;

/// Library-local result type for connection and configuration helpers.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the connection helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] figment::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),
}
