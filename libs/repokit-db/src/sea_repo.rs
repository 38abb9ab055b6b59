//! `SeaORM` implementation of the generic repository.

use async_trait::async_trait;
use repokit_query::{OrderBy, Page, PageParams, Scalar, SortDir, ValueMap};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    Iterable, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::filter::{coerce, null_value, sanitize, to_condition};
use crate::repo::{EntityRepository, RepoError};
use crate::schema::EntitySchema;

/// Generic repository bound to one entity schema and a pooled
/// `SeaORM` connection handle.
#[derive(Clone)]
pub struct SeaOrmRepository<E: EntityTrait> {
    db: DatabaseConnection,
    schema: EntitySchema<E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    pub fn new(db: DatabaseConnection, schema: EntitySchema<E>) -> Self {
        Self { db, schema }
    }

    #[must_use]
    pub fn schema(&self) -> &EntitySchema<E> {
        &self.schema
    }

    /// Sanitize user-supplied filters and compile them.
    fn condition(&self, filters: &ValueMap) -> Result<sea_orm::Condition, RepoError> {
        let clean = sanitize(filters, &self.schema);
        Ok(to_condition(&clean, &self.schema)?)
    }

    /// Order fields unknown to the schema skip ordering rather than fail.
    fn apply_order(&self, select: Select<E>, order: &OrderBy) -> Select<E> {
        match self.schema.get(&order.field) {
            Some(f) => {
                let dir = match order.dir {
                    SortDir::Asc => Order::Asc,
                    SortDir::Desc => Order::Desc,
                };
                select.order_by(f.col, dir)
            }
            None => {
                tracing::debug!(field = %order.field, "order field unknown to entity schema, skipping ordering");
                select
            }
        }
    }
}

#[async_trait]
impl<E> EntityRepository<E> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send,
{
    async fn find_one(&self, filters: &ValueMap) -> Result<Option<E::Model>, RepoError> {
        let cond = self.condition(filters)?;
        Ok(E::find().filter(cond).one(&self.db).await?)
    }

    async fn find_paginated(
        &self,
        filters: &ValueMap,
        params: &PageParams,
        order: &OrderBy,
    ) -> Result<Page<E::Model>, RepoError> {
        let cond = self.condition(filters)?;

        // Total ignores the pagination window.
        let total = E::find().filter(cond.clone()).count(&self.db).await?;

        let select = self.apply_order(E::find().filter(cond), order);
        let items = select
            .offset(params.offset())
            .limit(params.size())
            .all(&self.db)
            .await?;

        Ok(Page::new(items, total, params))
    }

    async fn find_all(
        &self,
        filters: &ValueMap,
        order: &OrderBy,
    ) -> Result<Vec<E::Model>, RepoError> {
        let cond = self.condition(filters)?;
        let select = self.apply_order(E::find().filter(cond), order);
        Ok(select.all(&self.db).await?)
    }

    async fn count(&self, filters: &ValueMap) -> Result<u64, RepoError> {
        let cond = self.condition(filters)?;
        Ok(E::find().filter(cond).count(&self.db).await?)
    }

    async fn create<A>(&self, payload: A) -> Result<E::Model, RepoError>
    where
        A: IntoActiveModel<E::ActiveModel> + Send,
    {
        Ok(payload.into_active_model().insert(&self.db).await?)
    }

    async fn create_from_map(&self, values: &ValueMap) -> Result<E::Model, RepoError> {
        let clean = sanitize(values, &self.schema);
        let mut active = <E::ActiveModel as ActiveModelTrait>::default();
        for (key, value) in clean.iter() {
            if let Some(f) = self.schema.get(key) {
                let v = match value {
                    Scalar::Null => null_value(f.kind),
                    other => coerce(key, f.kind, other)?,
                };
                active.set(f.col, v);
            }
        }
        Ok(active.insert(&self.db).await?)
    }

    async fn update(
        &self,
        model: E::Model,
        patch: E::ActiveModel,
    ) -> Result<E::Model, RepoError> {
        let has_changes = E::Column::iter().any(|col| matches!(patch.get(col), ActiveValue::Set(_)));
        if !has_changes {
            return Ok(model);
        }

        let mut active = model.into_active_model();
        for col in E::Column::iter() {
            if let ActiveValue::Set(value) = patch.get(col) {
                active.set(col, value);
            }
        }
        Ok(active.update(&self.db).await?)
    }

    async fn update_from_map(
        &self,
        model: E::Model,
        values: &ValueMap,
    ) -> Result<E::Model, RepoError> {
        let clean = sanitize(values, &self.schema);
        if clean.is_empty() {
            return Ok(model);
        }

        let mut active = model.into_active_model();
        for (key, value) in clean.iter() {
            if let Some(f) = self.schema.get(key) {
                let v = match value {
                    Scalar::Null => null_value(f.kind),
                    other => coerce(key, f.kind, other)?,
                };
                active.set(f.col, v);
            }
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, model: E::Model) -> Result<u64, RepoError> {
        let outcome = model.into_active_model().delete(&self.db).await?;
        Ok(outcome.rows_affected)
    }
}
