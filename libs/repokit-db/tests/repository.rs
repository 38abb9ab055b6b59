//! End-to-end repository tests against an in-memory sqlite database.

use repokit_db::{
    DbConnTrait, EntityRepository, EntitySchema, FieldKind, PoolCfg, SeaOrmRepository, connect,
    is_ready,
};
use repokit_query::{OrderBy, PageParams, ValueMap};
use sea_orm::{DatabaseConnection, Schema, Set};

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub age: i64,
        pub email: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn user_schema() -> EntitySchema<users::Entity> {
    EntitySchema::<users::Entity>::new()
        .field("id", users::Column::Id, FieldKind::I64)
        .field("name", users::Column::Name, FieldKind::String)
        .field("age", users::Column::Age, FieldKind::I64)
        .field("email", users::Column::Email, FieldKind::String)
}

/// An in-memory sqlite database is per-connection, so the pool is
/// pinned to a single connection.
async fn setup() -> (DatabaseConnection, SeaOrmRepository<users::Entity>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let pool = PoolCfg {
        max_conns: Some(1),
        ..PoolCfg::default()
    };
    let db = connect("sqlite::memory:", &pool).await.unwrap();

    let backend = db.get_database_backend();
    let stmt = backend.build(&Schema::new(backend).create_table_from_entity(users::Entity));
    db.execute(stmt).await.unwrap();

    let repo = SeaOrmRepository::new(db.clone(), user_schema());
    (db, repo)
}

fn new_user(name: &str, age: i64) -> users::ActiveModel {
    users::ActiveModel {
        name: Set(name.to_owned()),
        age: Set(age),
        ..Default::default()
    }
}

async fn seed(repo: &SeaOrmRepository<users::Entity>, n: i64) {
    for i in 0..n {
        repo.create(new_user(&format!("user-{i}"), 20 + i))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn create_then_find_one_round_trips() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let filters = ValueMap::new().with("name", "boo");
    let found = repo.find_one(&filters).await.unwrap();

    // Assert
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn readiness_probe_succeeds_on_a_live_connection() {
    let (db, _repo) = setup().await;
    assert!(is_ready(&db).await);
}

#[tokio::test]
async fn find_one_on_empty_store_returns_none() {
    let (_db, repo) = setup().await;
    let found = repo.find_one(&ValueMap::new()).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn find_one_ignores_unknown_filter_keys() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act: the bogus key must not leak into the query.
    let filters = ValueMap::new().with("name", "boo").with("wrong_field", "x");
    let found = repo.find_one(&filters).await.unwrap();

    // Assert
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn pagination_windows_items_but_not_total() {
    // Arrange
    let (_db, repo) = setup().await;
    seed(&repo, 15).await;

    // Act
    let first = repo
        .find_paginated(
            &ValueMap::new(),
            &PageParams::new(1, 10).unwrap(),
            &OrderBy::asc("id"),
        )
        .await
        .unwrap();
    let second = repo
        .find_paginated(
            &ValueMap::new(),
            &PageParams::new(2, 10).unwrap(),
            &OrderBy::asc("id"),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total, 15);
    assert_eq!(first.page, 1);
    assert_eq!(first.size, 10);

    assert_eq!(second.items.len(), 5);
    assert_eq!(second.total, 15);
    assert_eq!(second.page, 2);

    // The two windows are disjoint and contiguous.
    assert_eq!(first.items.last().unwrap().id + 1, second.items[0].id);
}

#[tokio::test]
async fn pagination_honors_filters_in_total() {
    // Arrange
    let (_db, repo) = setup().await;
    seed(&repo, 15).await;
    repo.create(new_user("odd-one-out", 99)).await.unwrap();

    // Act
    let page = repo
        .find_paginated(
            &ValueMap::new().with("age", 99),
            &PageParams::default(),
            &OrderBy::default(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "odd-one-out");
}

#[tokio::test]
async fn descending_order_puts_the_max_first() {
    // Arrange
    let (_db, repo) = setup().await;
    seed(&repo, 15).await;

    // Act
    let page = repo
        .find_paginated(
            &ValueMap::new(),
            &PageParams::new(1, 10).unwrap(),
            &OrderBy::desc("age"),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(page.items[0].age, 34);
    assert!(page.items.windows(2).all(|w| w[0].age >= w[1].age));
}

#[tokio::test]
async fn unknown_order_field_skips_ordering_instead_of_failing() {
    // Arrange
    let (_db, repo) = setup().await;
    seed(&repo, 3).await;

    // Act
    let page = repo
        .find_paginated(
            &ValueMap::new(),
            &PageParams::default(),
            &OrderBy::asc("wrong_field"),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn find_all_returns_every_match_ordered() {
    // Arrange
    let (_db, repo) = setup().await;
    seed(&repo, 15).await;

    // Act
    let all = repo
        .find_all(&ValueMap::new(), &OrderBy::desc("id"))
        .await
        .unwrap();

    // Assert
    assert_eq!(all.len(), 15);
    assert!(all.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn count_honors_filters() {
    // Arrange
    let (_db, repo) = setup().await;
    repo.create(new_user("a", 7)).await.unwrap();
    repo.create(new_user("b", 7)).await.unwrap();
    repo.create(new_user("c", 8)).await.unwrap();

    // Act & Assert
    assert_eq!(repo.count(&ValueMap::new()).await.unwrap(), 3);
    assert_eq!(
        repo.count(&ValueMap::new().with("age", 7)).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn create_from_map_ignores_unknown_keys() {
    // Arrange
    let (_db, repo) = setup().await;

    // Act: a JSON body, with string values coercing to the column kinds.
    let values: ValueMap = serde_json::from_value(serde_json::json!({
        "name": "boo",
        "age": "7",
        "wrong_field": "x",
    }))
    .unwrap();
    let created = repo.create_from_map(&values).await.unwrap();

    // Assert
    assert_eq!(created.name, "boo");
    assert_eq!(created.age, 7);
    assert_eq!(created.email, None);
}

#[tokio::test]
async fn update_applies_only_explicitly_set_fields() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let patch = users::ActiveModel {
        age: Set(8),
        ..Default::default()
    };
    let updated = repo.update(created.clone(), patch).await.unwrap();

    // Assert
    assert_eq!(updated.age, 8);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn update_with_empty_patch_is_a_noop() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let updated = repo
        .update(created.clone(), users::ActiveModel::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(updated, created);
}

#[tokio::test]
async fn update_from_map_overwrites_only_present_known_keys() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let values = ValueMap::new().with("age", 8).with("wrong_field", "x");
    let updated = repo.update_from_map(created.clone(), &values).await.unwrap();

    // Assert
    assert_eq!(updated.age, 8);
    assert_eq!(updated.name, created.name);
}

#[tokio::test]
async fn update_from_map_can_null_out_a_column() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo
        .create(users::ActiveModel {
            name: Set("boo".to_owned()),
            age: Set(7),
            email: Set(Some("boo@example.com".to_owned())),
            ..Default::default()
        })
        .await
        .unwrap();

    // Act
    let values = ValueMap::new().with("email", None::<String>);
    let updated = repo.update_from_map(created, &values).await.unwrap();

    // Assert
    assert_eq!(updated.email, None);
}

#[tokio::test]
async fn update_from_map_with_no_known_keys_is_a_noop() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let values = ValueMap::new().with("wrong_field", "x");
    let updated = repo.update_from_map(created.clone(), &values).await.unwrap();

    // Assert
    assert_eq!(updated, created);
}

#[tokio::test]
async fn delete_removes_the_row() {
    // Arrange
    let (_db, repo) = setup().await;
    let created = repo.create(new_user("boo", 7)).await.unwrap();

    // Act
    let affected = repo.delete(created).await.unwrap();

    // Assert
    assert_eq!(affected, 1);
    assert_eq!(repo.count(&ValueMap::new()).await.unwrap(), 0);
}
