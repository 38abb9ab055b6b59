//! The generic repository seam.
//!
//! `EntityRepository` is the trait services depend on; `SeaOrmRepository`
//! is the stock implementation. Every operation is a single round trip
//! to the persistence backend with no internal concurrency or retry.

use async_trait::async_trait;
use repokit_query::{OrderBy, Page, PageParams, ValueMap};
use sea_orm::{EntityTrait, IntoActiveModel};
use thiserror::Error;

use crate::filter::FilterBuildError;

/// Repository-level error. Persistence failures pass through unmodified.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Params(#[from] repokit_query::Error),

    #[error(transparent)]
    Filter(#[from] FilterBuildError),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

/// CRUD operations over one entity type, bound to a persistence handle
/// at construction.
///
/// Absence is never an error: single-row lookups return `Ok(None)`.
#[async_trait]
pub trait EntityRepository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send,
{
    /// Sanitize filters and return the first match, if any.
    async fn find_one(&self, filters: &ValueMap) -> Result<Option<E::Model>, RepoError>;

    /// Sanitize filters, apply ordering and the pagination window, and
    /// separately count every match ignoring the window. An order field
    /// unknown to the schema silently skips ordering.
    async fn find_paginated(
        &self,
        filters: &ValueMap,
        params: &PageParams,
        order: &OrderBy,
    ) -> Result<Page<E::Model>, RepoError>;

    /// Same sanitize+order logic as `find_paginated`, no window.
    async fn find_all(&self, filters: &ValueMap, order: &OrderBy)
    -> Result<Vec<E::Model>, RepoError>;

    /// Count of rows matching the sanitized filters.
    async fn count(&self, filters: &ValueMap) -> Result<u64, RepoError>;

    /// Insert a structured payload and return the persisted model with
    /// database-assigned fields populated.
    async fn create<A>(&self, payload: A) -> Result<E::Model, RepoError>
    where
        A: IntoActiveModel<E::ActiveModel> + Send;

    /// Insert from a raw field map; keys unknown to the schema are ignored.
    async fn create_from_map(&self, values: &ValueMap) -> Result<E::Model, RepoError>;

    /// Partial update from a structured patch: only fields explicitly
    /// set on the patch overwrite the existing model. An empty patch is
    /// a no-op returning the model unchanged, without a round trip.
    async fn update(&self, model: E::Model, patch: E::ActiveModel)
    -> Result<E::Model, RepoError>;

    /// Partial update from a raw field map: only keys present in the
    /// map and defined on the entity schema are overwritten.
    async fn update_from_map(
        &self,
        model: E::Model,
        values: &ValueMap,
    ) -> Result<E::Model, RepoError>;

    /// Delete the model; returns the number of rows affected.
    async fn delete(&self, model: E::Model) -> Result<u64, RepoError>;
}
