//! Review persistence
//!
//! Append-only: rows are inserted once and never updated or deleted.

use chrono::Utc;
use reva_common::db::{NewReview, Review};
use reva_common::Result;
use sqlx::SqlitePool;

/// Store of analyzed reviews
#[derive(Clone)]
pub struct ReviewStore {
    pool: SqlitePool,
}

impl ReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one review, assigning its id and creation time
    ///
    /// Runs in a transaction scoped to the single insert; any failure rolls
    /// back and no partial row is committed.
    pub async fn insert(&self, new: NewReview) -> Result<Review> {
        let created_at = new.created_at.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (product_name, review_text, sentiment, sentiment_score, key_points, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.product_name)
        .bind(&new.review_text)
        .bind(new.sentiment)
        .bind(new.sentiment_score)
        .bind(&new.key_points)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        Ok(Review {
            id,
            product_name: new.product_name,
            review_text: new.review_text,
            sentiment: new.sentiment,
            sentiment_score: new.sentiment_score,
            key_points: new.key_points,
            created_at,
        })
    }

    /// All reviews, newest first
    ///
    /// Full scan ordered by creation time; id breaks same-timestamp ties so
    /// the order stays deterministic.
    pub async fn list_all(&self) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, product_name, review_text, sentiment, sentiment_score, key_points, created_at
            FROM reviews
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Number of stored reviews
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use reva_common::db::{create_schema, Sentiment};

    async fn test_store() -> ReviewStore {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        create_schema(&pool).await.expect("schema");
        ReviewStore::new(pool)
    }

    fn sample(product: &str, created_at: Option<chrono::DateTime<Utc>>) -> NewReview {
        NewReview {
            product_name: product.to_string(),
            review_text: "Solid product, does what the box says".to_string(),
            sentiment: Sentiment::Positive,
            sentiment_score: 0.92,
            key_points: "- solid\n- as advertised".to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = test_store().await;

        let first = store.insert(sample("Widget", None)).await.unwrap();
        let second = store.insert(sample("Gadget", None)).await.unwrap();

        assert!(first.id >= 1);
        assert!(second.id > first.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn insert_stamps_missing_created_at() {
        let store = test_store().await;

        let before = Utc::now();
        let review = store.insert(sample("Widget", None)).await.unwrap();
        let after = Utc::now();

        assert!(review.created_at >= before && review.created_at <= after);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let store = test_store().await;
        let base = Utc::now();

        // Insert out of chronological order
        store
            .insert(sample("middle", Some(base - Duration::minutes(5))))
            .await
            .unwrap();
        store.insert(sample("newest", Some(base))).await.unwrap();
        store
            .insert(sample("oldest", Some(base - Duration::minutes(10))))
            .await
            .unwrap();

        let listed = store.list_all().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn same_timestamp_ties_break_by_id() {
        let store = test_store().await;
        let at = Utc::now();

        store.insert(sample("first", Some(at))).await.unwrap();
        store.insert(sample("second", Some(at))).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed[0].product_name, "second");
        assert_eq!(listed[1].product_name, "first");
    }

    #[tokio::test]
    async fn round_trip_preserves_fields() {
        let store = test_store().await;

        let inserted = store.insert(sample("Widget", None)).await.unwrap();
        let listed = store.list_all().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, inserted.id);
        assert_eq!(listed[0].sentiment, Sentiment::Positive);
        assert_eq!(listed[0].sentiment_score, 0.92);
        assert_eq!(listed[0].key_points, inserted.key_points);
    }
}
