use std::time::Duration;

use armory_core::{Effect, ItemId, ItemInput};
use armory_storage::{ItemRepository, PostgresItemRepository, StorageError};
use armory_test_infra::postgres::{PostgresConfig, PostgresServer};
use sqlx::postgres::PgPoolOptions;

struct Fixture {
    _postgres: PostgresServer,
    repo: PostgresItemRepository,
}

impl Fixture {
    async fn start() -> Self {
        let postgres = PostgresServer::new(PostgresConfig::builder().build())
            .await
            .expect("start postgres");
        let url = postgres.database_url().await.expect("postgres url");
        let pool = connect_with_retry(&url).await;

        sqlx::raw_sql(include_str!("../ddl/postgres/items.sql"))
            .execute(&pool)
            .await
            .expect("create schema");

        Self {
            _postgres: postgres,
            repo: PostgresItemRepository::new(pool),
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::PgPool {
    let mut last_error = None;

    for _ in 0..20 {
        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect postgres: {last_error:?}");
}

fn effect(json: &str) -> Effect {
    Effect::from_json(json).unwrap()
}

fn input(name: &str, effect_json: &str, price: f64) -> ItemInput {
    ItemInput::new(name, effect(effect_json), price)
}

#[tokio::test]
async fn create_and_get_by_id() {
    let fixture = Fixture::start().await;

    let created = fixture
        .repo
        .create(input("Potion", r#"{"HP": 40}"#, 50.0))
        .await
        .unwrap();

    let got = fixture.repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(got, created);
    assert_eq!(got.effect.get("HP").unwrap().as_i64(), Some(40));
    assert_eq!(got.price, 50.0);
}

#[tokio::test]
async fn get_by_id_returns_none_for_unknown_id() {
    let fixture = Fixture::start().await;

    let got = fixture.repo.get_by_id(ItemId::new(4242)).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn effect_round_trips_through_json_column() {
    let fixture = Fixture::start().await;
    let original = effect(r#"{"HP": 100, "MP": 50, "Attack": -10, "Crit": 0.125}"#);

    let created = fixture
        .repo
        .create(ItemInput::new("Elixir", original.clone(), 200.0))
        .await
        .unwrap();

    let got = fixture.repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(got.effect, original);
}

#[tokio::test]
async fn get_all_returns_most_recent_first() {
    let fixture = Fixture::start().await;

    let a = fixture.repo.create(input("A", "{}", 1.0)).await.unwrap();
    let b = fixture.repo.create(input("B", "{}", 2.0)).await.unwrap();
    let c = fixture.repo.create(input("C", "{}", 3.0)).await.unwrap();

    let ids: Vec<ItemId> = fixture
        .repo
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[tokio::test]
async fn get_all_on_empty_table_is_empty() {
    let fixture = Fixture::start().await;
    assert!(fixture.repo.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_identity() {
    let fixture = Fixture::start().await;

    let created = fixture
        .repo
        .create(input("Potion", r#"{"HP": 40, "MP": 5}"#, 50.0))
        .await
        .unwrap();

    let updated = fixture
        .repo
        .update(created.id, input("Mega Potion", r#"{"HP": 100}"#, 150.0))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Mega Potion");
    assert_eq!(updated.price, 150.0);
    assert_eq!(updated.effect, effect(r#"{"HP": 100}"#));
    assert_eq!(
        fixture.repo.get_by_id(created.id).await.unwrap().unwrap(),
        updated
    );
}

#[tokio::test]
async fn update_unknown_id_does_not_insert() {
    let fixture = Fixture::start().await;

    let got = fixture
        .repo
        .update(ItemId::new(77), input("Ghost", "{}", 0.0))
        .await
        .unwrap();

    assert!(got.is_none());
    assert!(fixture.repo.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_record_once() {
    let fixture = Fixture::start().await;

    let created = fixture
        .repo
        .create(input("Potion", r#"{"HP": 40}"#, 50.0))
        .await
        .unwrap();

    assert!(fixture.repo.delete(created.id).await.unwrap());
    assert!(fixture.repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!fixture.repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn corrupt_effect_column_surfaces_invalid_data() {
    let fixture = Fixture::start().await;

    let created = fixture
        .repo
        .create(input("Potion", r#"{"HP": 40}"#, 50.0))
        .await
        .unwrap();

    sqlx::query("UPDATE items SET effect = $2 WHERE id = $1")
        .bind(created.id.get())
        .bind("[1, 2, 3]")
        .execute(fixture.repo.pool())
        .await
        .unwrap();

    let err = fixture.repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[tokio::test]
async fn closed_pool_surfaces_unavailable() {
    let fixture = Fixture::start().await;
    fixture.repo.pool().close().await;

    let err = fixture.repo.get_all().await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}
