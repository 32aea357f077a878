//! PostgreSQL store tests
//!
//! Require a reachable database: DATABASE_URL=postgres://... cargo test -- --ignored --test-threads=1

use std::sync::Arc;

use serde_json::{json, Map, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};

use bookshelf_server::{
    repository::{BookStore, PgBookStore, Repository},
    services::catalog::CatalogService,
    AppError,
};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn power_up() -> Map<String, Value> {
    object(json!({
        "isbn": "0691161518",
        "amazon_url": "http://a.co/eobPtX2",
        "author": "Matthew Lane",
        "language": "english",
        "pages": 264,
        "publisher": "Princeton University Press",
        "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
        "year": 2017
    }))
}

fn garp() -> Map<String, Value> {
    object(json!({
        "isbn": "1524744794",
        "amazon_url": "https://www.amazon.com/World-According-Garp-Novel/dp/1524744794",
        "author": "John Irving",
        "language": "english",
        "pages": 544,
        "publisher": "Dutton",
        "title": "The World According to Garp",
        "year": 2018
    }))
}

/// Connect, migrate, and start from an empty table
async fn setup() -> (PgPool, CatalogService) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    sqlx::query("DELETE FROM books")
        .execute(&pool)
        .await
        .expect("Failed to clear books");

    let catalog = CatalogService::new(Repository::new(pool.clone()));
    for payload in [power_up(), garp()] {
        catalog.create(&payload).await.expect("Failed to seed book");
    }
    (pool, catalog)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_get_all_books() {
    let (_pool, catalog) = setup().await;
    let books = catalog.get_all().await.unwrap();
    let isbns: Vec<_> = books.iter().map(|b| b.isbn.as_str()).collect();
    assert_eq!(isbns, ["0691161518", "1524744794"]);
}

#[tokio::test]
#[ignore]
async fn test_get_a_book() {
    let (_pool, catalog) = setup().await;
    let book = catalog.get_by_isbn("1524744794").await.unwrap();
    assert_eq!(book.title, "The World According to Garp");
}

#[tokio::test]
#[ignore]
async fn test_update_a_book() {
    let (_pool, catalog) = setup().await;
    let book = catalog
        .update(
            "1524744794",
            &object(json!({ "title": "The World According to Carps" })),
        )
        .await
        .unwrap();
    assert_eq!(book.title, "The World According to Carps");
    assert_eq!(book.author, "John Irving");

    let err = catalog
        .update("1524744794", &object(json!({ "year": -2020 })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[ignore]
async fn test_unique_violation_is_conflict() {
    let (pool, catalog) = setup().await;
    let existing = catalog.get_by_isbn("0691161518").await.unwrap();

    // Bypass the service pre-check to hit the primary key constraint
    let store: Arc<dyn BookStore> = Arc::new(PgBookStore::new(pool));
    let err = store.insert(&existing).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn test_delete_a_book() {
    let (_pool, catalog) = setup().await;
    catalog.remove("0691161518").await.unwrap();
    assert!(matches!(
        catalog.get_by_isbn("0691161518").await,
        Err(AppError::NotFound(_))
    ));
}
