//! Integration tests for database initialization
//!
//! Covers first-run creation, idempotent re-initialization, and applying
//! the schema to an in-memory pool the way the service tests do.

use chrono::Utc;
use reva_common::db::{create_schema, init_database};
use sqlx::{Row, SqlitePool};
use tempfile::TempDir;

const REVIEW_COLUMNS: [&str; 7] = [
    "id",
    "product_name",
    "review_text",
    "sentiment",
    "sentiment_score",
    "key_points",
    "created_at",
];

#[tokio::test]
async fn init_creates_database_file_and_schema() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("data").join("reviews.db");

    let pool = init_database(&db_path).await.expect("init should succeed");
    assert!(db_path.exists(), "database file should be created");

    let columns: Vec<String> = sqlx::query("PRAGMA table_info(reviews)")
        .fetch_all(&pool)
        .await
        .unwrap()
        .iter()
        .map(|row| row.get::<String, _>(1))
        .collect();

    for expected in REVIEW_COLUMNS {
        assert!(
            columns.contains(&expected.to_string()),
            "reviews table missing column '{}'",
            expected
        );
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("reviews.db");

    let pool = init_database(&db_path).await.unwrap();
    drop(pool);

    // Second init opens the existing database without error
    let pool = init_database(&db_path).await.expect("re-init should succeed");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn schema_applies_to_memory_pool() {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    create_schema(&pool).await.unwrap();
    create_schema(&pool).await.unwrap(); // idempotent

    sqlx::query(
        "INSERT INTO reviews (product_name, review_text, sentiment, sentiment_score, key_points, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind("Widget")
    .bind("Sturdy and quiet, works as advertised")
    .bind("positive")
    .bind(0.97_f64)
    .bind("- sturdy\n- quiet")
    .bind(Utc::now())
    .execute(&pool)
    .await
    .expect("insert into fresh schema should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
