//! Live integration tests for gymcat-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. They need `DATABASE_URL` pointing at a server the
//! harness may create databases on, so they are ignored by default:
//! `cargo test -p gymcat-db -- --ignored`.

use gymcat_core::{Nutrition, Product, ProductType};
use gymcat_db::{sync_products, PgProductStore, ProductStore};
use rust_decimal::Decimal;

fn vanilla(cents: i64) -> Product {
    Product {
        flavour: "Vanilla".to_string(),
        product_type: ProductType::ProteinPowder,
        price: Decimal::new(cents, 2),
        description: Some("35g of protein per scoop.".to_string()),
        ingredients: Some(vec!["whey isolate".to_string(), "vanilla bean".to_string()]),
        benefits: Some(vec!["Supports lean muscle growth".to_string()]),
        nutrition: Some(Nutrition {
            calories: 130.0,
            protein: 35.0,
            carbs: 3.5,
            fat: 1.0,
        }),
        rating: Some(Decimal::new(46, 1)),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn insert_then_find_round_trips_every_field(pool: sqlx::PgPool) {
    let store = PgProductStore::new(pool);
    store
        .insert_product(&vanilla(3999))
        .await
        .expect("insert_product failed");

    let stored = store
        .find_by_flavour("Vanilla")
        .await
        .expect("find_by_flavour failed")
        .expect("product should exist");

    assert!(stored.content_matches(&vanilla(3999)), "stored: {stored:?}");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn second_sync_writes_nothing(pool: sqlx::PgPool) {
    let store = PgProductStore::new(pool);

    let first = sync_products(&store, &[vanilla(3999)]).await;
    assert_eq!(first.inserted, 1);

    let second = sync_products(&store, &[vanilla(3999)]).await;
    assert_eq!(second.writes(), 0);
    assert_eq!(second.unchanged, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn price_change_updates_the_row(pool: sqlx::PgPool) {
    let store = PgProductStore::new(pool);
    sync_products(&store, &[vanilla(3999)]).await;

    let report = sync_products(&store, &[vanilla(4499)]).await;
    assert_eq!(report.updated, 1);

    let row = store
        .get_row("Vanilla")
        .await
        .expect("get_row failed")
        .expect("row should exist");
    assert_eq!(row.price, Decimal::new(4499, 2));
    assert!(row.updated_at >= row.created_at);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_products_is_ordered_by_flavour(pool: sqlx::PgPool) {
    let store = PgProductStore::new(pool);
    let mut mocha = vanilla(4100);
    mocha.flavour = "Mocha".to_string();
    sync_products(&store, &[vanilla(3999), mocha]).await;

    let flavours: Vec<String> = store
        .list_products()
        .await
        .expect("list_products failed")
        .into_iter()
        .map(|p| p.flavour)
        .collect();
    assert_eq!(flavours, vec!["Mocha", "Vanilla"]);
}
